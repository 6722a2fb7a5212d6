//! None shaper - simple per-character advancement
//!
//! The most basic backend: one glyph per code point, advanced by the
//! font's advance width, with no OpenType logic at all. RTL runs are
//! emitted in reverse so the glyph stream still reads in visual order.
//! Useful for tests and for builds that cannot carry a real shaper.

use std::ops::Range;
use std::sync::Arc;

use khatt_core::{
    error::Result,
    traits::{FontRef, ShapeBackend},
    types::{Direction, FeatureSetting, Glyph, RunParams},
};

/// A minimal shaper that only advances glyphs
pub struct NoneShaper;

impl NoneShaper {
    /// Create a new NoneShaper
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoneShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeBackend for NoneShaper {
    fn name(&self) -> &'static str {
        "none"
    }

    fn shape_run(
        &self,
        text: &[char],
        window: Range<usize>,
        params: &RunParams,
        font: Arc<dyn FontRef>,
        _features: &[FeatureSetting],
    ) -> Result<Vec<Glyph>> {
        log::debug!("none shaper: {} code points", window.len());

        let mut glyphs = Vec::with_capacity(window.len());
        let mut emit = |i: usize| {
            // .notdef when the font has no glyph for the character
            let glyph_id = font.glyph_id(text[i]).unwrap_or(0);
            let advance = font.advance_width(glyph_id) as i32;
            let (x_advance, y_advance) = match params.direction {
                Direction::TopToBottom => (0, -advance),
                _ => (advance, 0),
            };
            glyphs.push(Glyph {
                index: glyph_id,
                cluster: i as u32,
                x_advance,
                y_advance,
                x_offset: 0,
                y_offset: 0,
            });
        };

        if params.direction.is_backward() {
            for i in window.rev() {
                emit(i);
            }
        } else {
            for i in window {
                emit(i);
            }
        }

        Ok(glyphs)
    }
}
