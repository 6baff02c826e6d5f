use std::path::PathBuf;

use clap::Parser;

use crate::mixer::{MixRequest, Mode, Region, RegionSelector, SLOT_COUNT};

pub const DEFAULT_OUTPUT: &str = "mix.png";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "ft-mixer",
    version,
    about = "Mix the Fourier components of up to four grayscale images"
)]
pub struct Config {
    #[arg(long = "image", value_name = "PATH")]
    pub images: Vec<PathBuf>,

    #[arg(long = "adjust", value_name = "SLOT:BRIGHTNESS:CONTRAST", value_parser = parse_adjustment)]
    pub adjustments: Vec<SlotAdjustment>,

    #[arg(long, value_enum, default_value_t = Mode::MagnitudePhase)]
    pub mode: Mode,

    #[arg(long, value_delimiter = ',', default_values_t = [1.0, 0.0, 0.0, 0.0], allow_negative_numbers = true)]
    pub weights_a: Vec<f64>,

    #[arg(long, value_delimiter = ',', default_values_t = [1.0, 0.0, 0.0, 0.0], allow_negative_numbers = true)]
    pub weights_b: Vec<f64>,

    #[arg(long, value_enum, value_delimiter = ',', default_values_t = [RegionSelector::Inner; SLOT_COUNT])]
    pub regions_a: Vec<RegionSelector>,

    #[arg(long, value_enum, value_delimiter = ',', default_values_t = [RegionSelector::Inner; SLOT_COUNT])]
    pub regions_b: Vec<RegionSelector>,

    #[arg(long, value_name = "X,Y,W,H", value_parser = parse_region)]
    pub region: Option<Region>,

    #[arg(long, default_value_t = false, conflicts_with = "region")]
    pub no_region: bool,

    #[arg(long, value_name = "PATH")]
    pub recipe: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub save_recipe: Option<PathBuf>,

    #[arg(long, value_name = "PNG", default_value = DEFAULT_OUTPUT)]
    pub out: PathBuf,

    #[arg(long, value_name = "DIR")]
    pub components: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub base64: bool,

    #[arg(long, default_value_t = false)]
    pub preview: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotAdjustment {
    // zero-based
    pub slot: usize,
    pub brightness: f64,
    pub contrast: f64,
}

impl Config {
    pub fn mix_request(&self) -> MixRequest {
        let mut request = MixRequest {
            mode: self.mode,
            region: if self.no_region {
                None
            } else {
                Some(self.region.unwrap_or(Region::FULL))
            },
            ..MixRequest::default()
        };
        for i in 0..SLOT_COUNT {
            request.weights_a[i] = self.weights_a.get(i).copied().unwrap_or(0.0);
            request.weights_b[i] = self.weights_b.get(i).copied().unwrap_or(0.0);
            request.regions_a[i] = self.regions_a.get(i).copied().unwrap_or_default();
            request.regions_b[i] = self.regions_b.get(i).copied().unwrap_or_default();
        }
        request
    }
}

fn parse_adjustment(raw: &str) -> Result<SlotAdjustment, String> {
    let parts = raw.split(':').map(str::trim).collect::<Vec<_>>();
    let [slot, brightness, contrast] = parts.as_slice() else {
        return Err("expected SLOT:BRIGHTNESS:CONTRAST".to_string());
    };
    let slot = slot
        .parse::<usize>()
        .map_err(|_| format!("invalid slot '{slot}'"))?;
    if !(1..=SLOT_COUNT).contains(&slot) {
        return Err(format!("slot must be 1..={SLOT_COUNT}"));
    }
    Ok(SlotAdjustment {
        slot: slot - 1,
        brightness: parse_finite(brightness, "brightness")?,
        contrast: parse_finite(contrast, "contrast")?,
    })
}

fn parse_region(raw: &str) -> Result<Region, String> {
    let parts = raw.split(',').map(str::trim).collect::<Vec<_>>();
    let [x, y, w, h] = parts.as_slice() else {
        return Err("expected X,Y,W,H".to_string());
    };
    Ok(Region::new(
        parse_finite(x, "x")?,
        parse_finite(y, "y")?,
        parse_finite(w, "w")?,
        parse_finite(h, "h")?,
    ))
}

fn parse_finite(raw: &str, field: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("invalid {field} '{raw}'")),
    }
}
