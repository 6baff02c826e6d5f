use ndarray::Array2;

/// Resize an 8-bit plane to `(height, width)` by area averaging.
pub fn resize_area(src: &Array2<u8>, width: usize, height: usize) -> Array2<u8> {
    let (src_h, src_w) = src.dim();
    if width == 0 || height == 0 || src_h == 0 || src_w == 0 {
        return Array2::zeros((height, width));
    }
    if (src_h, src_w) == (height, width) {
        return src.clone();
    }

    let x_spans = spans(src_w, width);
    let y_spans = spans(src_h, height);

    let mut out = Array2::<u8>::zeros((height, width));
    for (y, ys) in y_spans.iter().enumerate() {
        for (x, xs) in x_spans.iter().enumerate() {
            let mut acc = 0.0f64;
            let mut area = 0.0f64;
            for &(sy, wy) in ys {
                for &(sx, wx) in xs {
                    let w = wy * wx;
                    acc += f64::from(src[[sy, sx]]) * w;
                    area += w;
                }
            }
            let v = if area > 0.0 { acc / area } else { 0.0 };
            out[[y, x]] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

fn spans(src_len: usize, dst_len: usize) -> Vec<Vec<(usize, f64)>> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            let start = d as f64 * scale;
            let end = ((d + 1) as f64 * scale).min(src_len as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len);
            (first..last)
                .filter_map(|s| {
                    let overlap = end.min((s + 1) as f64) - start.max(s as f64);
                    (overlap > 1e-12).then_some((s, overlap))
                })
                .collect()
        })
        .collect()
}
