use ft_mixer::resample::resize_area;
use ft_mixer::spectrum::{fft2, fftshift, ifft2, ifftshift};
use ndarray::{array, Array2};

fn ramp(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(y, x)| (y * cols + x) as f64)
}

#[test]
fn constant_plane_puts_all_energy_at_the_shifted_center() {
    let plane = Array2::<f64>::ones((5, 6));
    let centered = fftshift(&fft2(&plane));

    for ((y, x), c) in centered.indexed_iter() {
        if (y, x) == (2, 3) {
            assert!((c.re - 30.0).abs() < 1e-9, "DC should be the pixel sum");
            assert!(c.im.abs() < 1e-9);
        } else {
            assert!(c.norm() < 1e-9, "unexpected energy at ({y}, {x})");
        }
    }
}

#[test]
fn impulse_transforms_to_flat_spectrum() {
    let mut plane = Array2::<f64>::zeros((4, 4));
    plane[[0, 0]] = 1.0;
    for c in fft2(&plane).iter() {
        assert!((c.re - 1.0).abs() < 1e-12);
        assert!(c.im.abs() < 1e-12);
    }
}

#[test]
fn inverse_transform_restores_input() {
    let plane = ramp(6, 9);
    let back = ifft2(&fft2(&plane));
    for (a, b) in plane.iter().zip(back.iter()) {
        assert!((a - b.re).abs() < 1e-9);
        assert!(b.im.abs() < 1e-9);
    }
}

#[test]
fn shift_and_unshift_are_inverse_for_odd_and_even_sizes() {
    for (rows, cols) in [(4, 6), (5, 7), (1, 3), (8, 5)] {
        let plane = ramp(rows, cols);
        assert_eq!(ifftshift(&fftshift(&plane)), plane, "{rows}x{cols}");
        assert_eq!(fftshift(&ifftshift(&plane)), plane, "{rows}x{cols}");
    }
}

#[test]
fn fftshift_swaps_quadrants_on_even_sizes() {
    let plane = array![[1.0, 2.0], [3.0, 4.0]];
    assert_eq!(fftshift(&plane), array![[4.0, 3.0], [2.0, 1.0]]);

    let odd = array![[0.0, 1.0, 2.0]];
    // numpy: fftshift([0, 1, 2]) == [2, 0, 1]
    assert_eq!(fftshift(&odd), array![[2.0, 0.0, 1.0]]);
    assert_eq!(ifftshift(&odd), array![[1.0, 2.0, 0.0]]);
}

#[test]
fn area_resize_averages_blocks_when_shrinking() {
    let src = array![
        [0u8, 10, 100, 100],
        [20, 30, 100, 100],
        [50, 50, 0, 255],
        [50, 50, 255, 0],
    ];
    let out = resize_area(&src, 2, 2);
    assert_eq!(out, array![[15u8, 100], [50, 128]]);
}

#[test]
fn area_resize_handles_non_integer_ratios() {
    let src = Array2::from_elem((7, 5), 90u8);
    let out = resize_area(&src, 3, 4);
    assert_eq!(out.dim(), (4, 3));
    assert!(out.iter().all(|&v| v == 90));
}

#[test]
fn area_resize_repeats_pixels_when_enlarging() {
    let src = array![[0u8, 200], [40, 80]];
    let out = resize_area(&src, 4, 4);
    assert_eq!(
        out,
        array![
            [0u8, 0, 200, 200],
            [0, 0, 200, 200],
            [40, 40, 80, 80],
            [40, 40, 80, 80],
        ]
    );
}
