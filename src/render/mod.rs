mod halfblock;

pub use halfblock::HalfBlockRenderer;

use std::io::Write;

use ndarray::Array2;

use crate::resample::resize_area;

pub struct Frame<'a> {
    pub term_cols: u16,
    pub visual_rows: u16,
    pub pixels: &'a Array2<u8>,
    pub caption: &'a str,
    pub caption_cols: u16,
    pub sync_updates: bool,
}

pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()>;
}

pub fn preview_cells(width: usize, height: usize, max_cols: u16, max_rows: u16) -> (u16, u16) {
    if width == 0 || height == 0 || max_cols == 0 || max_rows == 0 {
        return (0, 0);
    }
    let max_px_h = max_rows as f64 * 2.0;
    let scale = (max_cols as f64 / width as f64).min(max_px_h / height as f64);
    let cols = ((width as f64 * scale).floor() as u16).clamp(1, max_cols);
    let px_h = ((height as f64 * scale).floor() as u16).max(2);
    let rows = (px_h / 2).clamp(1, max_rows);
    (cols, rows)
}

pub fn fit_plane(plane: &Array2<u8>, cols: u16, rows: u16) -> Array2<u8> {
    resize_area(plane, cols as usize, rows as usize * 2)
}
