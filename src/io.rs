use std::fs;
use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use image::{GrayImage, ImageFormat};
use ndarray::Array2;

use crate::error::MixerError;

pub const PLACEHOLDER_SIZE: usize = 200;

pub fn decode_grayscale(bytes: &[u8]) -> Result<Array2<u8>, MixerError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| MixerError::InvalidImage(e.to_string()))?
        .into_luma8();
    gray_to_plane(img)
}

pub fn load_grayscale(path: &Path) -> Result<Array2<u8>, MixerError> {
    let img = image::open(path)
        .map_err(|e| MixerError::InvalidImage(format!("{}: {e}", path.display())))?
        .into_luma8();
    gray_to_plane(img)
}

pub fn encode_png(plane: &Array2<u8>) -> anyhow::Result<Vec<u8>> {
    let img = plane_to_gray(plane)?;
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

pub fn encode_png_base64(plane: &Array2<u8>) -> anyhow::Result<String> {
    let png = encode_png(plane)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(png))
}

pub fn save_grayscale(plane: &Array2<u8>, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    plane_to_gray(plane)?.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

pub fn placeholder() -> Array2<u8> {
    Array2::zeros((PLACEHOLDER_SIZE, PLACEHOLDER_SIZE))
}

fn gray_to_plane(img: GrayImage) -> Result<Array2<u8>, MixerError> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    Array2::from_shape_vec((h, w), img.into_raw())
        .map_err(|e| MixerError::InvalidImage(e.to_string()))
}

fn plane_to_gray(plane: &Array2<u8>) -> anyhow::Result<GrayImage> {
    let (h, w) = plane.dim();
    let data = plane.iter().copied().collect::<Vec<_>>();
    GrayImage::from_raw(w as u32, h as u32, data)
        .ok_or_else(|| anyhow::anyhow!("plane {w}x{h} does not fit an image buffer"))
}
