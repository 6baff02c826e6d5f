use std::fmt;
use std::path::Path;

use crate::mixer::{MixRequest, Mode, Region, RegionSelector, SLOT_COUNT};

#[derive(Debug, Clone, PartialEq)]
pub enum RecipeError {
    Io(String),
    Parse { line: usize, message: String },
    MissingField(&'static str),
}

impl fmt::Display for RecipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::Parse { line, message } => write!(f, "parse error at line {line}: {message}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
        }
    }
}

impl std::error::Error for RecipeError {}

impl MixRequest {
    pub fn parse(text: &str) -> Result<Self, RecipeError> {
        let mut mode: Option<Mode> = None;
        let mut weights_a: Option<[f64; SLOT_COUNT]> = None;
        let mut weights_b: Option<[f64; SLOT_COUNT]> = None;
        let mut regions_a: Option<[RegionSelector; SLOT_COUNT]> = None;
        let mut regions_b: Option<[RegionSelector; SLOT_COUNT]> = None;
        let mut region: Option<Option<Region>> = None;

        for (line_idx, raw) in text.lines().enumerate() {
            let line_no = line_idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (key, value) = trimmed.split_once('=').ok_or(RecipeError::Parse {
                line: line_no,
                message: "expected <key>=<value>".to_string(),
            })?;
            let key = key.trim();
            let value = value.trim();

            match key {
                "mode" => {
                    let parsed = Mode::parse(value).ok_or_else(|| RecipeError::Parse {
                        line: line_no,
                        message: format!("unknown mode '{value}'"),
                    })?;
                    assign_once(&mut mode, parsed, line_no, key)?;
                }
                "weights_a" => {
                    let parsed = parse_weights(value, line_no, "weights_a")?;
                    assign_once(&mut weights_a, parsed, line_no, key)?;
                }
                "weights_b" => {
                    let parsed = parse_weights(value, line_no, "weights_b")?;
                    assign_once(&mut weights_b, parsed, line_no, key)?;
                }
                "regions_a" => {
                    let parsed = parse_selectors(value, line_no, "regions_a")?;
                    assign_once(&mut regions_a, parsed, line_no, key)?;
                }
                "regions_b" => {
                    let parsed = parse_selectors(value, line_no, "regions_b")?;
                    assign_once(&mut regions_b, parsed, line_no, key)?;
                }
                "region" => {
                    let parsed = parse_region(value, line_no)?;
                    assign_once(&mut region, parsed, line_no, key)?;
                }
                _ => {
                    return Err(RecipeError::Parse {
                        line: line_no,
                        message: format!("unknown key '{key}'"),
                    });
                }
            }
        }

        let defaults = Self::default();
        Ok(Self {
            mode: mode.ok_or(RecipeError::MissingField("mode"))?,
            weights_a: weights_a.unwrap_or(defaults.weights_a),
            weights_b: weights_b.unwrap_or(defaults.weights_b),
            regions_a: regions_a.unwrap_or(defaults.regions_a),
            regions_b: regions_b.unwrap_or(defaults.regions_b),
            region: region.unwrap_or(defaults.region),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecipeError> {
        let text =
            std::fs::read_to_string(path.as_ref()).map_err(|e| RecipeError::Io(e.to_string()))?;
        Self::parse(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RecipeError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| RecipeError::Io(e.to_string()))?;
            }
        }
        let body = format!("# ft_mixer recipe v1\n{}\n", self.to_text());
        std::fs::write(path, body).map_err(|e| RecipeError::Io(e.to_string()))
    }

    pub fn to_text(&self) -> String {
        let region = match &self.region {
            Some(r) => format!("{},{},{},{}", r.x, r.y, r.w, r.h),
            None => "none".to_string(),
        };
        [
            format!("mode={}", self.mode.as_str()),
            format!("weights_a={}", join_weights(&self.weights_a)),
            format!("weights_b={}", join_weights(&self.weights_b)),
            format!("regions_a={}", join_selectors(&self.regions_a)),
            format!("regions_b={}", join_selectors(&self.regions_b)),
            format!("region={region}"),
        ]
        .join("\n")
    }
}

fn assign_once<T>(
    slot: &mut Option<T>,
    value: T,
    line: usize,
    key: &str,
) -> Result<(), RecipeError> {
    if slot.is_some() {
        return Err(RecipeError::Parse {
            line,
            message: format!("duplicate '{key}' field"),
        });
    }
    *slot = Some(value);
    Ok(())
}

fn split_exact<'a>(
    s: &'a str,
    line: usize,
    field: &'static str,
) -> Result<[&'a str; SLOT_COUNT], RecipeError> {
    let parts = s.split(',').map(str::trim).collect::<Vec<_>>();
    parts.try_into().map_err(|parts: Vec<&str>| RecipeError::Parse {
        line,
        message: format!("{field} expects {SLOT_COUNT} values, got {}", parts.len()),
    })
}

fn parse_f64(s: &str, line: usize, field: &'static str) -> Result<f64, RecipeError> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RecipeError::Parse {
            line,
            message: format!("invalid float for {field}"),
        }),
    }
}

fn parse_weights(
    s: &str,
    line: usize,
    field: &'static str,
) -> Result<[f64; SLOT_COUNT], RecipeError> {
    let parts = split_exact(s, line, field)?;
    let mut out = [0.0; SLOT_COUNT];
    for (dst, part) in out.iter_mut().zip(parts) {
        *dst = parse_f64(part, line, field)?;
    }
    Ok(out)
}

fn parse_selectors(
    s: &str,
    line: usize,
    field: &'static str,
) -> Result<[RegionSelector; SLOT_COUNT], RecipeError> {
    let parts = split_exact(s, line, field)?;
    let mut out = [RegionSelector::Inner; SLOT_COUNT];
    for (dst, part) in out.iter_mut().zip(parts) {
        *dst = RegionSelector::parse(part).ok_or_else(|| RecipeError::Parse {
            line,
            message: format!("{field}: expected inner/outer, got '{part}'"),
        })?;
    }
    Ok(out)
}

fn parse_region(s: &str, line: usize) -> Result<Option<Region>, RecipeError> {
    if s.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let parts = s.split(',').map(str::trim).collect::<Vec<_>>();
    let [x, y, w, h] = parts.as_slice() else {
        return Err(RecipeError::Parse {
            line,
            message: "region expects x,y,w,h or none".to_string(),
        });
    };
    Ok(Some(Region::new(
        parse_f64(x, line, "region")?,
        parse_f64(y, line, "region")?,
        parse_f64(w, line, "region")?,
        parse_f64(h, line, "region")?,
    )))
}

fn join_weights(weights: &[f64]) -> String {
    weights
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn join_selectors(selectors: &[RegionSelector]) -> String {
    selectors
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
