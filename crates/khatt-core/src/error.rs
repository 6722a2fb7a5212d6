//! Error types for khatt

use thiserror::Error;

pub type Result<T> = std::result::Result<T, KhattError>;

/// Main error type for khatt
#[derive(Debug, Error)]
pub enum KhattError {
    #[error("cannot lay out an empty paragraph")]
    EmptyText,

    #[error("no font bound to the paragraph")]
    MissingFont,

    #[error("invalid font feature: {0:?}")]
    InvalidFeature(String),

    #[error("shaping failed: {0}")]
    ShapingFailed(String),
}
