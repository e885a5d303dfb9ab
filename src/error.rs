//! Error type shared by every alpha shape query

use thiserror::Error;

/// Errors raised while building an alpha complex
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The points cannot be triangulated (fewer than 3, or all collinear)
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Alpha is negative or NaN
    #[error("Invalid alpha: {0} (expected a non-negative value)")]
    InvalidAlpha(f64),

    /// A point has a NaN or infinite coordinate
    #[error("Non-finite coordinate in point #{index}")]
    NonFiniteCoordinate { index: usize },
}

impl Error {
    /// Creates a degenerate input error with context
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput(reason.into())
    }

    /// Returns true for [`Error::DegenerateInput`]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Error::DegenerateInput(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
