//! khatt: complex text layout for a single paragraph
//!
//! khatt turns a paragraph of Unicode text into a positioned glyph
//! stream in visual order. It couples three independently specified
//! Unicode algorithms - bidi reordering (UAX #9), script resolution
//! (UAX #24), and OpenType shaping - and keeps their invariants intact
//! across the seams.
//!
//! The main object is [`Paragraph`]: set the text and its properties,
//! bind a font, run [`Paragraph::layout`], and read the glyphs back.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use khatt::{Paragraph, types::BaseDirection};
//!
//! # fn load_font() -> Arc<dyn khatt::traits::FontRef> { unimplemented!() }
//! # fn main() -> khatt::Result<()> {
//! let mut paragraph = Paragraph::new();
//! paragraph.set_text(&"مرحبا world".chars().map(u32::from).collect::<Vec<_>>());
//! paragraph.set_base_direction(BaseDirection::Default);
//! paragraph.set_font(load_font(), 0, 11);
//! paragraph.layout()?;
//!
//! for glyph in paragraph.glyphs() {
//!     println!("gid {} from code point {}", glyph.index, glyph.cluster);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! For one-shot shaping the [`shape_u32`] and [`shape_u8`] helpers wrap
//! the whole dance; the UTF-8 variant additionally rewrites glyph
//! clusters into byte offsets of the original string.

use std::sync::Arc;

pub use khatt_core::{error, traits, types};
pub use khatt_core::{KhattError, Result};
pub use khatt_shape_hr as shape_hr;
pub use khatt_unicode as unicode;

mod paragraph;
pub use paragraph::Paragraph;

use khatt_core::traits::FontRef;
use khatt_core::types::{BaseDirection, Glyph};

/// Shapes a UTF-32 paragraph in one call.
///
/// Builds a transient [`Paragraph`] with the default backend and returns
/// an owned copy of its glyphs. Glyph clusters are code point indices
/// into `text`.
pub fn shape_u32(
    text: &[u32],
    font: Arc<dyn FontRef>,
    direction: BaseDirection,
    features: &[&str],
) -> Result<Vec<Glyph>> {
    let mut paragraph = Paragraph::new();
    paragraph.set_text(text);
    paragraph.set_base_direction(direction);
    paragraph.set_font(font, 0, text.len());
    for feature in features {
        paragraph.add_feature(feature)?;
    }
    paragraph.layout()?;
    Ok(paragraph.glyphs().to_vec())
}

/// Shapes a UTF-8 paragraph in one call.
///
/// Transcodes to UTF-32, shapes with [`shape_u32`], then rewrites each
/// glyph's cluster from a code point index to the byte offset of that
/// code point in `text`.
pub fn shape_u8(
    text: &str,
    font: Arc<dyn FontRef>,
    direction: BaseDirection,
    features: &[&str],
) -> Result<Vec<Glyph>> {
    let units: Vec<u32> = text.chars().map(u32::from).collect();
    let mut glyphs = shape_u32(&units, font, direction, features)?;

    // byte offset of every code point, indexed by code point position
    let mut offsets = Vec::with_capacity(units.len());
    let mut byte = 0usize;
    for ch in text.chars() {
        offsets.push(byte as u32);
        byte += ch.len_utf8();
    }

    for glyph in &mut glyphs {
        glyph.cluster = offsets[glyph.cluster as usize];
    }
    Ok(glyphs)
}
