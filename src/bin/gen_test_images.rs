use std::f64::consts::PI;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ndarray::Array2;

const DEFAULT_SIZE: usize = 128;
const DEFAULT_SEED: u64 = 0xF7_2026;

pub(crate) struct Args {
    pub(crate) out: PathBuf,
    pub(crate) size: usize,
    pub(crate) seed: u64,
}

pub(crate) fn parse_args(argv: impl IntoIterator<Item = String>) -> Args {
    let mut out = PathBuf::from("assets/fixtures");
    let mut size = DEFAULT_SIZE;
    let mut seed = DEFAULT_SEED;

    let mut it = argv.into_iter();
    while let Some(k) = it.next() {
        let v = it.next();
        match (k.as_str(), v) {
            ("--out", Some(p)) => out = PathBuf::from(p),
            ("--size", Some(v)) => {
                if let Ok(n) = v.parse::<usize>() {
                    size = n.clamp(8, 4096);
                }
            }
            ("--seed", Some(v)) => {
                if let Ok(n) = v.parse::<u64>() {
                    seed = n;
                }
            }
            _ => {}
        }
    }

    Args { out, size, seed }
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1));
    fs::create_dir_all(&args.out)
        .with_context(|| format!("create dir {}", args.out.display()))?;

    for (name, plane) in make_fixtures(args.size, args.seed) {
        let path = args.out.join(format!("{name}.png"));
        ft_mixer::io::save_grayscale(&plane, &path)
            .with_context(|| format!("write {}", path.display()))?;
        println!("generated: {}", path.display());
    }
    Ok(())
}

pub(crate) fn make_fixtures(size: usize, seed: u64) -> Vec<(&'static str, Array2<u8>)> {
    vec![
        ("checkerboard", checkerboard(size, (size / 8).max(1))),
        ("gradient", gradient(size)),
        ("rings", rings(size, 6.0)),
        ("noise", noise(size, seed)),
    ]
}

pub(crate) fn checkerboard(size: usize, cell: usize) -> Array2<u8> {
    Array2::from_shape_fn((size, size), |(y, x)| {
        if (x / cell + y / cell) % 2 == 0 { 255 } else { 0 }
    })
}

pub(crate) fn gradient(size: usize) -> Array2<u8> {
    let denom = size.saturating_sub(1).max(1) as f64;
    Array2::from_shape_fn((size, size), |(_, x)| (x as f64 / denom * 255.0).round() as u8)
}

pub(crate) fn rings(size: usize, periods: f64) -> Array2<u8> {
    let c = size as f64 / 2.0;
    Array2::from_shape_fn((size, size), |(y, x)| {
        let r = ((x as f64 - c).powi(2) + (y as f64 - c).powi(2)).sqrt() / c;
        let v = 0.5 + 0.5 * (2.0 * PI * periods * r).cos();
        (v * 255.0).round() as u8
    })
}

pub(crate) fn noise(size: usize, seed: u64) -> Array2<u8> {
    let mut rng = fastrand::Rng::with_seed(seed);
    Array2::from_shape_fn((size, size), |_| rng.u8(..))
}
