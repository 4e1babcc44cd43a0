//! Error type shared by every chart builder and helper.

use thiserror::Error;

/// Errors raised while building, styling or rendering a figure.
///
/// Builders fail fast: the first problem found is returned and no partial
/// figure escapes.
#[derive(Debug, Error)]
pub enum VizError {
    /// A parameter is malformed: zero column count, bad colour, unknown column, ...
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The dataset has no rows.
    #[error("dataset is empty")]
    EmptyDataset,

    /// A numeric-only operation found no numeric columns to work with.
    #[error("no numeric columns found")]
    NoNumericColumns,

    /// The plotting backend refused to draw.
    #[error("render failed: {0}")]
    Render(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl VizError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        VizError::InvalidArgument(msg.into())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, VizError>;
