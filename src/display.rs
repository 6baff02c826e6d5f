use clap::ValueEnum;
use ndarray::{Array2, Zip};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ComponentKind {
    Magnitude,
    Phase,
    Real,
    Imaginary,
    #[value(alias = "image")]
    Pixels,
}

impl ComponentKind {
    pub const ALL: [Self; 5] = [
        Self::Magnitude,
        Self::Phase,
        Self::Real,
        Self::Imaginary,
        Self::Pixels,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Magnitude => "magnitude",
            Self::Phase => "phase",
            Self::Real => "real",
            Self::Imaginary => "imaginary",
            Self::Pixels => "pixels",
        }
    }
}

pub fn log_compress(data: &Array2<f64>) -> Array2<f64> {
    data.mapv(|v| 20.0 * (v.abs() + 1.0).ln())
}

/// A constant plane has no range to stretch and maps to all zeros.
pub fn normalize_to_u8(data: &Array2<f64>) -> Array2<u8> {
    let (lo, hi) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let range = hi - lo;
    let mut out = Array2::<u8>::zeros(data.dim());
    if !range.is_finite() || range <= f64::EPSILON {
        return out;
    }

    let scale = 255.0 / range;
    Zip::from(&mut out).and(data).for_each(|dst, &v| {
        *dst = if v.is_finite() {
            ((v - lo) * scale).round().clamp(0.0, 255.0) as u8
        } else {
            0
        };
    });
    out
}
