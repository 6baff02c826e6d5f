use log::debug;
use ndarray::{Array2, Zip};
use rustfft::num_complex::Complex64;

use crate::display::{log_compress, normalize_to_u8, ComponentKind};
use crate::error::MixerError;
use crate::mixer::Mode;
use crate::resample::resize_area;
use crate::spectrum::{fft2, fftshift};

pub const DEFAULT_BRIGHTNESS: f64 = 0.0;
pub const DEFAULT_CONTRAST: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct Decomposition {
    pub transform: Array2<Complex64>,
    pub magnitude: Array2<f64>,
    pub phase: Array2<f64>,
    pub real: Array2<f64>,
    pub imaginary: Array2<f64>,
}

impl Decomposition {
    pub fn of(pixels: &Array2<u8>) -> Self {
        let transform = fftshift(&fft2(&pixels.mapv(f64::from)));
        Self {
            magnitude: transform.mapv(|c| c.norm()),
            phase: transform.mapv(|c| c.arg()),
            real: transform.mapv(|c| c.re),
            imaginary: transform.mapv(|c| c.im),
            transform,
        }
    }

    pub fn pair(&self, mode: Mode) -> (&Array2<f64>, &Array2<f64>) {
        match mode {
            Mode::MagnitudePhase => (&self.magnitude, &self.phase),
            Mode::RealImaginary => (&self.real, &self.imaginary),
        }
    }
}

#[derive(Debug, Clone)]
struct Loaded {
    pixels: Array2<u8>,
    display: Array2<u8>,
    spectrum: Decomposition,
}

#[derive(Debug, Clone)]
pub struct ImageSource {
    loaded: Option<Loaded>,
    brightness: f64,
    contrast: f64,
}

impl Default for ImageSource {
    fn default() -> Self {
        Self {
            loaded: None,
            brightness: DEFAULT_BRIGHTNESS,
            contrast: DEFAULT_CONTRAST,
        }
    }
}

impl ImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.loaded.as_ref().map(|l| l.pixels.dim())
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    pub fn contrast(&self) -> f64 {
        self.contrast
    }

    pub fn pixels(&self) -> Option<&Array2<u8>> {
        self.loaded.as_ref().map(|l| &l.pixels)
    }

    pub fn display_pixels(&self) -> Option<&Array2<u8>> {
        self.loaded.as_ref().map(|l| &l.display)
    }

    pub fn spectrum(&self) -> Option<&Decomposition> {
        self.loaded.as_ref().map(|l| &l.spectrum)
    }

    pub fn load(&mut self, pixels: Array2<u8>) -> Result<(), MixerError> {
        let (h, w) = pixels.dim();
        if h == 0 || w == 0 {
            return Err(MixerError::InvalidImage(format!(
                "image has no pixels ({w}x{h})"
            )));
        }
        self.brightness = DEFAULT_BRIGHTNESS;
        self.contrast = DEFAULT_CONTRAST;
        self.rebuild(pixels);
        Ok(())
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        let Some(loaded) = self.loaded.take() else {
            return;
        };
        debug!(
            "resize {}x{} -> {width}x{height}",
            loaded.pixels.ncols(),
            loaded.pixels.nrows()
        );
        let resized = resize_area(&loaded.pixels, width, height);
        self.rebuild(resized);
    }

    pub fn apply_brightness_contrast(&mut self, brightness: f64, contrast: f64) {
        let Some(loaded) = self.loaded.take() else {
            return;
        };
        self.brightness = brightness;
        self.contrast = contrast;
        self.rebuild(loaded.pixels);
    }

    pub fn component_display(&self, kind: ComponentKind) -> Option<Array2<u8>> {
        let loaded = self.loaded.as_ref()?;
        let spectrum = &loaded.spectrum;
        let view = match kind {
            ComponentKind::Pixels => return Some(loaded.display.clone()),
            ComponentKind::Magnitude => log_compress(&spectrum.magnitude),
            ComponentKind::Phase => spectrum.phase.clone(),
            ComponentKind::Real => log_compress(&spectrum.real),
            ComponentKind::Imaginary => log_compress(&spectrum.imaginary),
        };
        Some(normalize_to_u8(&view))
    }

    fn rebuild(&mut self, pixels: Array2<u8>) {
        let display = adjust(&pixels, self.brightness, self.contrast);
        let spectrum = Decomposition::of(&display);
        self.loaded = Some(Loaded {
            pixels,
            display,
            spectrum,
        });
    }
}

fn adjust(pixels: &Array2<u8>, brightness: f64, contrast: f64) -> Array2<u8> {
    if brightness == DEFAULT_BRIGHTNESS && contrast == DEFAULT_CONTRAST {
        return pixels.clone();
    }
    let mut out = Array2::<u8>::zeros(pixels.dim());
    Zip::from(&mut out).and(pixels).for_each(|dst, &p| {
        let v = f64::from(p) / 255.0 + brightness;
        let v = (v - 0.5) * contrast + 0.5;
        let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        *dst = (v * 255.0).round() as u8;
    });
    out
}
