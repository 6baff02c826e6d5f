use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context};
use log::info;
use ndarray::Array2;

use crate::config::Config;
use crate::display::ComponentKind;
use crate::io;
use crate::mixer::{MixRequest, Mixer, SLOT_COUNT};
use crate::render::{fit_plane, preview_cells, Frame, HalfBlockRenderer, Renderer};

pub fn validate(cfg: &Config) -> anyhow::Result<()> {
    if cfg.images.is_empty() && cfg.save_recipe.is_none() {
        bail!("at least one --image is required");
    }
    if cfg.images.len() > SLOT_COUNT {
        bail!("at most {SLOT_COUNT} --image arguments are supported");
    }
    for (flag, len) in [
        ("--weights-a", cfg.weights_a.len()),
        ("--weights-b", cfg.weights_b.len()),
        ("--regions-a", cfg.regions_a.len()),
        ("--regions-b", cfg.regions_b.len()),
    ] {
        if len != SLOT_COUNT {
            bail!("{flag} expects {SLOT_COUNT} comma-separated values, got {len}");
        }
    }
    for adj in &cfg.adjustments {
        if adj.slot >= cfg.images.len() {
            eprintln!(
                "warning: --adjust targets slot {} which has no --image; ignoring",
                adj.slot + 1
            );
        }
    }
    Ok(())
}

pub fn run(cfg: Config) -> anyhow::Result<()> {
    validate(&cfg)?;

    let request = match &cfg.recipe {
        Some(path) => MixRequest::load(path)
            .with_context(|| format!("read recipe {}", path.display()))?,
        None => cfg.mix_request(),
    };
    if let Some(path) = &cfg.save_recipe {
        request
            .save(path)
            .with_context(|| format!("write recipe {}", path.display()))?;
        info!("saved recipe to {}", path.display());
    }
    if cfg.images.is_empty() {
        return Ok(());
    }

    let mut mixer = Mixer::new();
    for (slot, path) in cfg.images.iter().enumerate() {
        mixer
            .update_image_path(slot, path)
            .with_context(|| format!("load slot {}", slot + 1))?;
    }
    for adj in &cfg.adjustments {
        if adj.slot < cfg.images.len() {
            mixer.adjust_brightness_contrast(adj.slot, adj.brightness, adj.contrast)?;
        }
    }

    if let Some(dir) = &cfg.components {
        write_components(&mixer, dir)?;
    }

    let mixed = mixer.mix(&request).context("mix")?;
    io::save_grayscale(&mixed, &cfg.out)
        .with_context(|| format!("write {}", cfg.out.display()))?;
    let (h, w) = mixed.dim();
    info!("wrote {w}x{h} mix to {}", cfg.out.display());

    let mut stdout = std::io::stdout();
    if cfg.base64 {
        let encoded = io::encode_png_base64(&mixed).context("encode output")?;
        writeln!(stdout, "{encoded}")?;
    }
    if cfg.preview {
        let caption = format!(
            "{} {}x{} -> {}",
            request.mode.as_str(),
            w,
            h,
            cfg.out.display()
        );
        preview(&mixed, &caption, &mut stdout)?;
    }
    Ok(())
}

pub fn write_components(mixer: &Mixer, dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create components directory {}", dir.display()))?;
    for slot in 0..SLOT_COUNT {
        for kind in ComponentKind::ALL {
            let plane = mixer
                .component_display(slot, kind)?
                .unwrap_or_else(io::placeholder);
            let path = dir.join(format!("slot{}_{}.png", slot + 1, kind.as_str()));
            io::save_grayscale(&plane, &path)
                .with_context(|| format!("write {}", path.display()))?;
        }
    }
    Ok(())
}

pub fn preview(plane: &Array2<u8>, caption: &str, out: &mut dyn Write) -> anyhow::Result<()> {
    let (term_cols, term_rows) = crossterm::terminal::size().unwrap_or((80, 24));
    // Leave room for the caption and the shell prompt.
    let max_rows = term_rows.saturating_sub(2).max(1);
    let (h, w) = plane.dim();
    let (cols, rows) = preview_cells(w, h, term_cols, max_rows);
    if cols == 0 || rows == 0 {
        eprintln!("warning: terminal too small for a preview");
        return Ok(());
    }

    let fitted = fit_plane(plane, cols, rows);
    let frame = Frame {
        term_cols: cols,
        visual_rows: rows,
        pixels: &fitted,
        caption,
        caption_cols: term_cols,
        sync_updates: true,
    };
    HalfBlockRenderer::new().render(&frame, out)
}
