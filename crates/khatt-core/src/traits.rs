//! Capability traits at the pipeline seams
//!
//! The layout pipeline does not know which shaper it is driving or how
//! fonts are loaded. [`FontRef`] gives backends access to font data and
//! the handful of metrics needed for degraded shaping, and
//! [`ShapeBackend`] is the shaper capability itself: hand it the whole
//! paragraph plus one run window, get positioned glyphs back. Any
//! implementation of these traits can be slotted into a `Paragraph`.

use std::ops::Range;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{FeatureSetting, Glyph, GlyphId, RunParams};

/// Font reference used during shaping
///
/// Implementations wrap whatever font representation the embedding
/// application uses (memory-mapped files, font databases, test doubles)
/// and are shared into the paragraph behind an `Arc`.
pub trait FontRef: Send + Sync {
    /// Raw font data (TTF/OTF bytes). May be empty for fonts that only
    /// support metric queries; backends then fall back to per-character
    /// advancement.
    fn data(&self) -> &[u8];

    /// Units per em from the font's head table, for scaling font-unit
    /// glyph positions to a target size.
    fn units_per_em(&self) -> u16;

    /// Maps a code point to a glyph ID, `None` when the font has no
    /// glyph for it.
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// Advance width for a glyph in font units.
    fn advance_width(&self, glyph_id: GlyphId) -> f32;
}

/// Text shaping backend
///
/// Called once per shaping-ready run. `text` is the entire paragraph and
/// `window` selects the run's code points; backends are expected to keep
/// the surrounding text available as shaping context so cursive joining
/// and mark placement work across run boundaries. Glyph `cluster` values
/// must be absolute indices into `text`.
pub trait ShapeBackend: Send + Sync {
    /// Name of this shaping backend for debugging and logging
    fn name(&self) -> &'static str;

    /// Shape one run into positioned glyphs, in visual order.
    fn shape_run(
        &self,
        text: &[char],
        window: Range<usize>,
        params: &RunParams,
        font: Arc<dyn FontRef>,
        features: &[FeatureSetting],
    ) -> Result<Vec<Glyph>>;
}
