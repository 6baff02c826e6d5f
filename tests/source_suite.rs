use ft_mixer::display::normalize_to_u8;
use ft_mixer::{ComponentKind, ImageSource, MixerError, Mode};
use ndarray::{array, Array2};

fn noise_plane(h: usize, w: usize, seed: u64) -> Array2<u8> {
    let mut rng = fastrand::Rng::with_seed(seed);
    Array2::from_shape_fn((h, w), |_| rng.u8(..))
}

#[test]
fn empty_source_reports_nothing_and_ignores_mutations() {
    let mut source = ImageSource::new();
    assert!(!source.is_loaded());
    assert_eq!(source.dimensions(), None);

    source.resize(8, 8);
    source.apply_brightness_contrast(0.5, 2.0);
    assert!(!source.is_loaded());
    assert_eq!(source.brightness(), 0.0);
    assert_eq!(source.contrast(), 1.0);

    for kind in ComponentKind::ALL {
        assert!(source.component_display(kind).is_none(), "{}", kind.as_str());
    }
}

#[test]
fn load_rejects_empty_planes() {
    let mut source = ImageSource::new();
    let err = source
        .load(Array2::zeros((0, 12)))
        .expect_err("zero-height plane must be rejected");
    assert!(matches!(err, MixerError::InvalidImage(_)));
    assert!(!source.is_loaded());
}

#[test]
fn load_computes_a_consistent_spectrum() {
    let mut source = ImageSource::new();
    source.load(noise_plane(6, 10, 7)).expect("load");
    assert_eq!(source.dimensions(), Some((6, 10)));

    let spectrum = source.spectrum().expect("spectrum after load");
    assert_eq!(spectrum.transform.dim(), (6, 10));
    for (((c, &m), &p), (&re, &im)) in spectrum
        .transform
        .iter()
        .zip(spectrum.magnitude.iter())
        .zip(spectrum.phase.iter())
        .zip(spectrum.real.iter().zip(spectrum.imaginary.iter()))
    {
        assert!((c.norm() - m).abs() < 1e-9);
        assert!(p > -std::f64::consts::PI - 1e-12 && p <= std::f64::consts::PI + 1e-12);
        assert_eq!((c.re, c.im), (re, im));
    }

    let (a, b) = spectrum.pair(Mode::RealImaginary);
    assert_eq!(a, &spectrum.real);
    assert_eq!(b, &spectrum.imaginary);
}

#[test]
fn brightness_contrast_follows_the_display_formula() {
    let mut source = ImageSource::new();
    source.load(array![[100u8, 10, 200]]).expect("load");

    // v = ((p / 255 + 0.2) - 0.5) * 3 + 0.5  ==>  3p - 102 in 8-bit units.
    source.apply_brightness_contrast(0.2, 3.0);
    assert_eq!(source.display_pixels(), Some(&array![[198u8, 0, 255]]));
    assert_eq!(source.pixels(), Some(&array![[100u8, 10, 200]]));
    assert_eq!(source.brightness(), 0.2);
    assert_eq!(source.contrast(), 3.0);
}

#[test]
fn brightness_contrast_is_absolute_not_compounded() {
    let original = noise_plane(8, 8, 11);
    let mut source = ImageSource::new();
    source.load(original.clone()).expect("load");

    source.apply_brightness_contrast(0.2, 1.5);
    source.apply_brightness_contrast(0.2, 1.5);
    let twice = source.display_pixels().cloned().expect("display");

    let mut fresh = ImageSource::new();
    fresh.load(original.clone()).expect("load");
    fresh.apply_brightness_contrast(0.2, 1.5);
    assert_eq!(Some(&twice), fresh.display_pixels());

    source.apply_brightness_contrast(0.0, 1.0);
    assert_eq!(source.display_pixels(), Some(&original));
}

#[test]
fn adjustment_recomputes_the_transform() {
    let mut source = ImageSource::new();
    source.load(noise_plane(8, 8, 3)).expect("load");
    let before = source.spectrum().expect("spectrum").transform.clone();

    source.apply_brightness_contrast(0.1, 0.5);
    let after = &source.spectrum().expect("spectrum").transform;
    assert_ne!(&before, after);

    let mut reference = ImageSource::new();
    reference
        .load(source.display_pixels().cloned().expect("display"))
        .expect("load");
    let expected = &reference.spectrum().expect("spectrum").transform;
    for (a, b) in after.iter().zip(expected.iter()) {
        assert!((a - b).norm() < 1e-9);
    }
}

#[test]
fn loading_resets_brightness_and_contrast() {
    let mut source = ImageSource::new();
    source.load(noise_plane(4, 4, 1)).expect("load");
    source.apply_brightness_contrast(-0.3, 2.0);

    let next = noise_plane(4, 4, 2);
    source.load(next.clone()).expect("load");
    assert_eq!(source.brightness(), 0.0);
    assert_eq!(source.contrast(), 1.0);
    assert_eq!(source.display_pixels(), Some(&next));
}

#[test]
fn resize_keeps_adjustment_and_refreshes_spectrum() {
    let mut source = ImageSource::new();
    source
        .load(array![
            [0u8, 10, 100, 100],
            [20, 30, 100, 100],
            [50, 50, 0, 255],
            [50, 50, 255, 0],
        ])
        .expect("load");
    source.apply_brightness_contrast(0.2, 3.0);
    source.resize(2, 2);

    assert_eq!(source.dimensions(), Some((2, 2)));
    assert_eq!(source.pixels(), Some(&array![[15u8, 100], [50, 128]]));
    // 3p - 102, clipped.
    assert_eq!(source.display_pixels(), Some(&array![[0u8, 198], [48, 255]]));
    assert_eq!(source.spectrum().expect("spectrum").magnitude.dim(), (2, 2));
}

#[test]
fn component_display_is_idempotent_and_full_range() {
    let mut source = ImageSource::new();
    source.load(noise_plane(16, 12, 5)).expect("load");

    for kind in ComponentKind::ALL {
        let first = source.component_display(kind).expect("loaded");
        let second = source.component_display(kind).expect("loaded");
        assert_eq!(first, second, "{}", kind.as_str());
        assert_eq!(first.dim(), (16, 12));
    }

    for kind in [
        ComponentKind::Magnitude,
        ComponentKind::Real,
        ComponentKind::Imaginary,
        ComponentKind::Phase,
    ] {
        let plane = source.component_display(kind).expect("loaded");
        assert_eq!(plane.iter().copied().min(), Some(0), "{}", kind.as_str());
        assert_eq!(plane.iter().copied().max(), Some(255), "{}", kind.as_str());
    }
}

#[test]
fn magnitude_display_peaks_at_the_dc_term() {
    let mut source = ImageSource::new();
    source.load(noise_plane(16, 16, 9)).expect("load");
    let magnitude = source
        .component_display(ComponentKind::Magnitude)
        .expect("loaded");
    assert_eq!(magnitude[[8, 8]], 255);
}

#[test]
fn pixels_component_is_the_adjusted_image() {
    let mut source = ImageSource::new();
    source.load(array![[100u8, 10], [200, 50]]).expect("load");
    source.apply_brightness_contrast(0.2, 3.0);
    assert_eq!(
        source.component_display(ComponentKind::Pixels),
        Some(array![[198u8, 0], [255, 48]])
    );
}

#[test]
fn constant_planes_normalize_to_zero() {
    let flat = Array2::from_elem((3, 3), 42.0);
    assert!(normalize_to_u8(&flat).iter().all(|&v| v == 0));

    let ramp = array![[-1.0, 0.0], [0.5, 1.0]];
    assert_eq!(normalize_to_u8(&ramp), array![[0u8, 128], [191, 255]]);
}
