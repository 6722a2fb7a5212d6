//! khatt core: the data that flows through the layout pipeline
//!
//! Every paragraph follows the same journey: code points are assigned
//! scripts, split into directional runs, shaped into glyphs. This crate
//! holds the types those stages exchange and the traits that let the
//! shaping stage be swapped out:
//!
//! - [`traits::FontRef`] - font data access
//! - [`traits::ShapeBackend`] - the shaper capability, one run at a time
//!
//! The pipeline stages themselves live in `khatt-unicode` (script
//! resolution, bidi itemization, run splitting) and the `khatt-shape-*`
//! backends.

pub mod error;
pub mod traits;

pub use error::{KhattError, Result};
pub use traits::{FontRef, ShapeBackend};

/// The data structures that power the pipeline
pub mod types {
    use std::ops::Range;

    use icu_properties::props::Script;

    /// Unique identifier for a glyph within a font
    pub type GlyphId = u32;

    /// Which way a shaped run flows
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Direction {
        LeftToRight,
        RightToLeft,
        TopToBottom,
    }

    impl Direction {
        /// Resolves the direction of a run from its bidi embedding level
        /// and the paragraph base direction. Vertical paragraphs are pure
        /// top-to-bottom; otherwise an odd level means right-to-left.
        pub fn from_level(base: BaseDirection, level: u8) -> Self {
            if base == BaseDirection::TopToBottom {
                Direction::TopToBottom
            } else if level % 2 == 1 {
                Direction::RightToLeft
            } else {
                Direction::LeftToRight
            }
        }

        /// Whether glyphs of a run in this direction are laid out against
        /// the logical character order.
        pub fn is_backward(self) -> bool {
            self == Direction::RightToLeft
        }
    }

    /// Paragraph base direction, the block direction in CSS terms
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum BaseDirection {
        /// Decide from the first character with a strong bidi type
        /// (UAX #9 rule P2); falls back to left-to-right when there is none.
        #[default]
        Default,
        LeftToRight,
        RightToLeft,
        /// Vertical text. No horizontal mixing: every character is laid
        /// out top-to-bottom.
        TopToBottom,
    }

    /// A shaped glyph with its pen movement, in font units
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Glyph {
        /// Glyph index in the font
        pub index: GlyphId,
        /// Index of the source code point this glyph was produced from
        pub cluster: u32,
        pub x_advance: i32,
        pub y_advance: i32,
        pub x_offset: i32,
        pub y_offset: i32,
    }

    /// A shaping-ready run: a contiguous range of code points sharing one
    /// script and one direction
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Run {
        /// Index of the first code point of the run
        pub pos: usize,
        /// Number of code points in the run
        pub len: usize,
        pub script: Script,
        pub direction: Direction,
    }

    impl Run {
        pub fn range(&self) -> Range<usize> {
            self.pos..self.pos + self.len
        }
    }

    /// One parsed OpenType feature setting, e.g. `dlig` or `ss01=2`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FeatureSetting {
        pub tag: [u8; 4],
        pub value: u32,
        /// First cluster the feature applies to
        pub start: u32,
        /// One past the last cluster the feature applies to
        pub end: u32,
    }

    /// Per-run shaping parameters handed to a [`crate::ShapeBackend`]
    #[derive(Debug, Clone)]
    pub struct RunParams {
        pub script: Script,
        pub direction: Direction,
        /// BCP 47 language hint; the backend default applies when unset
        pub language: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::types::{BaseDirection, Direction};

    #[test]
    fn even_levels_are_ltr() {
        assert_eq!(
            Direction::from_level(BaseDirection::Default, 0),
            Direction::LeftToRight
        );
        assert_eq!(
            Direction::from_level(BaseDirection::RightToLeft, 2),
            Direction::LeftToRight
        );
    }

    #[test]
    fn odd_levels_are_rtl() {
        assert_eq!(
            Direction::from_level(BaseDirection::Default, 1),
            Direction::RightToLeft
        );
        assert_eq!(
            Direction::from_level(BaseDirection::LeftToRight, 3),
            Direction::RightToLeft
        );
    }

    #[test]
    fn vertical_base_wins_over_level() {
        assert_eq!(
            Direction::from_level(BaseDirection::TopToBottom, 1),
            Direction::TopToBottom
        );
    }

    #[test]
    fn only_rtl_is_backward() {
        assert!(Direction::RightToLeft.is_backward());
        assert!(!Direction::LeftToRight.is_backward());
        assert!(!Direction::TopToBottom.is_backward());
    }
}
