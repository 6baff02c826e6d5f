use crate::render::{Frame, Renderer};
use std::io::Write;

pub struct HalfBlockRenderer {
    last_fg: Option<u8>,
    last_bg: Option<u8>,
}

impl HalfBlockRenderer {
    pub fn new() -> Self {
        Self {
            last_fg: None,
            last_bg: None,
        }
    }
}

impl Default for HalfBlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for HalfBlockRenderer {
    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let cols = frame.term_cols as usize;
        let visual_rows = frame.visual_rows as usize;
        let (h, w) = frame.pixels.dim();

        if cols == 0 || visual_rows == 0 || w == 0 || h == 0 {
            return Ok(());
        }
        if w != cols || h != visual_rows.saturating_mul(2) {
            // Internal mismatch; avoid panics.
            return Ok(());
        }

        if frame.sync_updates {
            out.write_all(b"\x1b[?2026h")?;
        }

        out.write_all(b"\x1b[0m")?;
        // Disable autowrap (DECAWM) while we paint full-width rows.
        out.write_all(b"\x1b[?7l")?;
        self.last_fg = None;
        self.last_bg = None;

        const HALF_BLOCK: char = '\u{2580}';

        for row in 0..visual_rows {
            let top_y = row * 2;
            let bot_y = top_y + 1;
            for x in 0..cols {
                let top = frame.pixels[[top_y, x]];
                let bot = frame.pixels[[bot_y, x]];

                if self.last_fg != Some(top) {
                    write!(out, "\x1b[38;2;{top};{top};{top}m")?;
                    self.last_fg = Some(top);
                }
                if self.last_bg != Some(bot) {
                    write!(out, "\x1b[48;2;{bot};{bot};{bot}m")?;
                    self.last_bg = Some(bot);
                }
                write!(out, "{HALF_BLOCK}")?;
            }
            out.write_all(b"\x1b[0m\r\n")?;
            self.last_fg = None;
            self.last_bg = None;
        }

        if !frame.caption.is_empty() {
            let width = frame.caption_cols as usize;
            let caption: String = frame.caption.chars().take(width).collect();
            write!(out, "{caption}\r\n")?;
        }

        // Restore autowrap.
        out.write_all(b"\x1b[?7h")?;

        if frame.sync_updates {
            out.write_all(b"\x1b[?2026l")?;
        }
        out.flush()?;
        Ok(())
    }
}
