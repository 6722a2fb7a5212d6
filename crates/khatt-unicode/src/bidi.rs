//! Bidi itemization (UAX #9) built on `unicode-bidi`
//!
//! The itemizer turns the paragraph into level runs in visual order:
//! maximal contiguous ranges of equal embedding level, listed in the
//! order they should be painted left to right. Vertical paragraphs skip
//! the algorithm entirely; every character is treated as directionally
//! neutral and the whole paragraph becomes a single level-0 run.

use khatt_core::types::BaseDirection;
use unicode_bidi::{BidiInfo, Level, LTR_LEVEL, RTL_LEVEL};

/// A maximal contiguous range of equal bidi embedding level, in code
/// point indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidiRun {
    /// Index of the first code point of the run
    pub pos: usize,
    /// Number of code points in the run
    pub len: usize,
    /// Embedding level; odd means right-to-left
    pub level: u8,
}

fn forced_level(base: BaseDirection) -> Option<Level> {
    match base {
        BaseDirection::LeftToRight => Some(LTR_LEVEL),
        BaseDirection::RightToLeft => Some(RTL_LEVEL),
        BaseDirection::Default | BaseDirection::TopToBottom => None,
    }
}

/// Computes the paragraph's level runs in visual order, covering every
/// code point exactly once.
pub fn level_runs(text: &[char], base: BaseDirection) -> Vec<BidiRun> {
    if text.is_empty() {
        return Vec::new();
    }

    if base == BaseDirection::TopToBottom {
        return vec![BidiRun {
            pos: 0,
            len: text.len(),
            level: 0,
        }];
    }

    // unicode-bidi works on UTF-8, so project the code points and keep a
    // map from byte boundaries back to code point indices.
    let utf8: String = text.iter().collect();
    let mut byte_to_char = vec![0usize; utf8.len() + 1];
    for (ci, (bi, _)) in utf8.char_indices().enumerate() {
        byte_to_char[bi] = ci;
    }
    byte_to_char[utf8.len()] = text.len();

    let info = BidiInfo::new(&utf8, forced_level(base));

    let mut runs = Vec::new();
    for para in &info.paragraphs {
        let (levels, line_runs) = info.visual_runs(para, para.range.clone());
        for range in line_runs {
            let level = levels[range.start];
            let pos = byte_to_char[range.start];
            let len = byte_to_char[range.end] - pos;
            if len > 0 {
                runs.push(BidiRun {
                    pos,
                    len,
                    level: level.number(),
                });
            }
        }
    }

    runs
}
