use ndarray::Array2;
use rustfft::num_complex::Complex64;
use rustfft::{FftDirection, FftPlanner};

pub fn fft2(input: &Array2<f64>) -> Array2<Complex64> {
    let mut data = input.mapv(|v| Complex64::new(v, 0.0));
    transform_in_place(&mut data, FftDirection::Forward);
    data
}

pub fn ifft2(input: &Array2<Complex64>) -> Array2<Complex64> {
    let mut data = input.clone();
    transform_in_place(&mut data, FftDirection::Inverse);
    let (rows, cols) = data.dim();
    let scale = 1.0 / (rows * cols).max(1) as f64;
    data.mapv_inplace(|c| c * scale);
    data
}

pub fn fftshift<T: Copy>(input: &Array2<T>) -> Array2<T> {
    let (rows, cols) = input.dim();
    roll(input, rows / 2, cols / 2)
}

/// Exact inverse of [`fftshift`], including odd sizes.
pub fn ifftshift<T: Copy>(input: &Array2<T>) -> Array2<T> {
    let (rows, cols) = input.dim();
    roll(input, rows - rows / 2, cols - cols / 2)
}

fn roll<T: Copy>(input: &Array2<T>, shift_rows: usize, shift_cols: usize) -> Array2<T> {
    let (rows, cols) = input.dim();
    if rows == 0 || cols == 0 {
        return input.clone();
    }
    Array2::from_shape_fn((rows, cols), |(y, x)| {
        let src_y = (y + rows - shift_rows % rows) % rows;
        let src_x = (x + cols - shift_cols % cols) % cols;
        input[[src_y, src_x]]
    })
}

fn transform_in_place(data: &mut Array2<Complex64>, direction: FftDirection) {
    let (rows, cols) = data.dim();
    if rows == 0 || cols == 0 {
        return;
    }

    let mut planner = FftPlanner::<f64>::new();
    let row_fft = planner.plan_fft(cols, direction);
    let col_fft = planner.plan_fft(rows, direction);
    let mut line = Vec::with_capacity(rows.max(cols));

    for mut row in data.rows_mut() {
        line.clear();
        line.extend(row.iter().copied());
        row_fft.process(&mut line);
        for (dst, src) in row.iter_mut().zip(&line) {
            *dst = *src;
        }
    }

    for mut col in data.columns_mut() {
        line.clear();
        line.extend(col.iter().copied());
        col_fft.process(&mut line);
        for (dst, src) in col.iter_mut().zip(&line) {
            *dst = *src;
        }
    }
}
