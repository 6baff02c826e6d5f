use std::path::Path;

use clap::ValueEnum;
use log::{debug, info, warn};
use ndarray::{s, Array2, Zip};
use rustfft::num_complex::Complex64;

use crate::display::{normalize_to_u8, ComponentKind};
use crate::error::MixerError;
use crate::io;
use crate::source::ImageSource;
use crate::spectrum::{ifft2, ifftshift};

pub const SLOT_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    #[default]
    #[value(alias = "magnitude_phase", alias = "mag-phase", alias = "polar")]
    MagnitudePhase,
    #[value(alias = "real_imaginary", alias = "re-im", alias = "cartesian")]
    RealImaginary,
}

impl Mode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "magnitude_phase" => Some(Self::MagnitudePhase),
            "real_imaginary" => Some(Self::RealImaginary),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MagnitudePhase => "magnitude_phase",
            Self::RealImaginary => "real_imaginary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RegionSelector {
    #[default]
    Inner,
    Outer,
}

impl RegionSelector {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inner" | "in" => Some(Self::Inner),
            "outer" | "out" => Some(Self::Outer),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "inner",
            Self::Outer => "outer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Region {
    pub const FULL: Self = Self {
        x: 0.0,
        y: 0.0,
        w: 1.0,
        h: 1.0,
    };

    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// `None` when the clamped rectangle has no area.
    pub fn to_pixel_rect(&self, width: usize, height: usize) -> Option<PixelRect> {
        let (wi, hi) = (width as i64, height as i64);
        // `as` truncates toward zero and maps NaN to 0.
        let x = ((self.x * width as f64) as i64).clamp(0, wi);
        let y = ((self.y * height as f64) as i64).clamp(0, hi);
        let w = ((self.w * width as f64) as i64).clamp(0, wi - x);
        let h = ((self.h * height as f64) as i64).clamp(0, hi - y);
        if w == 0 || h == 0 {
            return None;
        }
        Some(PixelRect {
            x: x as usize,
            y: y as usize,
            w: w as usize,
            h: h as usize,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

#[derive(Debug, Clone)]
pub struct RegionMasks {
    pub inner: Array2<f64>,
    pub outer: Array2<f64>,
}

impl RegionMasks {
    pub fn build(region: Option<&Region>, height: usize, width: usize) -> Self {
        let mut inner = Array2::<f64>::zeros((height, width));
        if let Some(rect) = region.and_then(|r| r.to_pixel_rect(width, height)) {
            debug!(
                "region mask x={} y={} w={} h={} on {width}x{height}",
                rect.x, rect.y, rect.w, rect.h
            );
            inner
                .slice_mut(s![rect.y..rect.y + rect.h, rect.x..rect.x + rect.w])
                .fill(1.0);
        }
        let outer = inner.mapv(|v| 1.0 - v);
        Self { inner, outer }
    }

    pub fn select(&self, selector: RegionSelector) -> &Array2<f64> {
        match selector {
            RegionSelector::Inner => &self.inner,
            RegionSelector::Outer => &self.outer,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MixRequest {
    pub weights_a: [f64; SLOT_COUNT],
    pub weights_b: [f64; SLOT_COUNT],
    pub regions_a: [RegionSelector; SLOT_COUNT],
    pub regions_b: [RegionSelector; SLOT_COUNT],
    pub region: Option<Region>,
    pub mode: Mode,
}

impl Default for MixRequest {
    fn default() -> Self {
        Self {
            weights_a: [0.0; SLOT_COUNT],
            weights_b: [0.0; SLOT_COUNT],
            regions_a: [RegionSelector::Inner; SLOT_COUNT],
            regions_b: [RegionSelector::Inner; SLOT_COUNT],
            region: None,
            mode: Mode::MagnitudePhase,
        }
    }
}

impl MixRequest {
    pub fn solo(slot: usize, mode: Mode) -> Self {
        let mut request = Self {
            region: Some(Region::FULL),
            mode,
            ..Self::default()
        };
        if slot < SLOT_COUNT {
            request.weights_a[slot] = 1.0;
            request.weights_b[slot] = 1.0;
        }
        request
    }
}

#[derive(Debug, Clone, Default)]
pub struct Mixer {
    sources: [ImageSource; SLOT_COUNT],
}

impl Mixer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self, slot: usize) -> Result<&ImageSource, MixerError> {
        self.sources.get(slot).ok_or(MixerError::InvalidSlot(slot))
    }

    pub fn loaded_count(&self) -> usize {
        self.sources.iter().filter(|s| s.is_loaded()).count()
    }

    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.sources.iter().find_map(ImageSource::dimensions)
    }

    pub fn update_image(&mut self, slot: usize, pixels: Array2<u8>) -> Result<(), MixerError> {
        let source = self
            .sources
            .get_mut(slot)
            .ok_or(MixerError::InvalidSlot(slot))?;
        let (h, w) = pixels.dim();
        source.load(pixels)?;
        info!("slot {slot}: loaded {w}x{h}");
        self.unify_sizes();
        Ok(())
    }

    pub fn update_image_bytes(&mut self, slot: usize, bytes: &[u8]) -> Result<(), MixerError> {
        self.check_slot(slot)?;
        let pixels = io::decode_grayscale(bytes)?;
        self.update_image(slot, pixels)
    }

    pub fn update_image_path(&mut self, slot: usize, path: &Path) -> Result<(), MixerError> {
        self.check_slot(slot)?;
        let pixels = io::load_grayscale(path)?;
        self.update_image(slot, pixels)
    }

    pub fn adjust_brightness_contrast(
        &mut self,
        slot: usize,
        brightness: f64,
        contrast: f64,
    ) -> Result<(), MixerError> {
        let source = self
            .sources
            .get_mut(slot)
            .ok_or(MixerError::InvalidSlot(slot))?;
        debug!("slot {slot}: brightness={brightness} contrast={contrast}");
        source.apply_brightness_contrast(brightness, contrast);
        Ok(())
    }

    pub fn component_display(
        &self,
        slot: usize,
        kind: ComponentKind,
    ) -> Result<Option<Array2<u8>>, MixerError> {
        Ok(self.source(slot)?.component_display(kind))
    }

    pub fn unify_sizes(&mut self) {
        let Some((min_h, min_w)) = self
            .sources
            .iter()
            .filter_map(ImageSource::dimensions)
            .reduce(|(ah, aw), (bh, bw)| (ah.min(bh), aw.min(bw)))
        else {
            return;
        };

        for source in &mut self.sources {
            if matches!(source.dimensions(), Some(dims) if dims != (min_h, min_w)) {
                source.resize(min_w, min_h);
            }
        }
    }

    pub fn mix(&self, request: &MixRequest) -> Result<Array2<u8>, MixerError> {
        let (height, width) = self.dimensions().ok_or(MixerError::NoImagesLoaded)?;
        let masks = RegionMasks::build(request.region.as_ref(), height, width);

        let mut acc_a = Array2::<f64>::zeros((height, width));
        let mut acc_b = Array2::<f64>::zeros((height, width));

        for (i, source) in self.sources.iter().enumerate() {
            let Some(spectrum) = source.spectrum() else {
                continue;
            };
            let (data_a, data_b) = spectrum.pair(request.mode);
            accumulate(
                &mut acc_a,
                data_a,
                masks.select(request.regions_a[i]),
                request.weights_a[i],
            );
            accumulate(
                &mut acc_b,
                data_b,
                masks.select(request.regions_b[i]),
                request.weights_b[i],
            );
        }

        let combined = recombine(&acc_a, &acc_b, request.mode);
        let spatial = ifft2(&ifftshift(&combined)).mapv(|c| c.norm());

        let out = normalize_to_u8(&spatial);
        if out.iter().all(|&v| v == 0) {
            warn!("mix produced a constant image ({width}x{height})");
        }
        Ok(out)
    }

    fn check_slot(&self, slot: usize) -> Result<(), MixerError> {
        self.source(slot).map(|_| ())
    }
}

fn accumulate(acc: &mut Array2<f64>, data: &Array2<f64>, mask: &Array2<f64>, weight: f64) {
    if weight == 0.0 {
        return;
    }
    Zip::from(acc)
        .and(data)
        .and(mask)
        .for_each(|acc, &d, &m| *acc += d * m * weight);
}

fn recombine(acc_a: &Array2<f64>, acc_b: &Array2<f64>, mode: Mode) -> Array2<Complex64> {
    let mut out = Array2::<Complex64>::zeros(acc_a.dim());
    Zip::from(&mut out)
        .and(acc_a)
        .and(acc_b)
        .for_each(|dst, &a, &b| {
            *dst = match mode {
                Mode::RealImaginary => Complex64::new(a, b),
                Mode::MagnitudePhase => Complex64::from_polar(a, b),
            };
        });
    out
}
