//! Errors raised while loading data, configuring analyzers and
//! querying distances.
use std::io;

use thiserror::Error;

/// Everything that can go wrong in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A labeler or analysis was configured with unusable parameters
    /// (e.g., `k = 0`, or thresholds that are not strictly decreasing).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// An object index outside `[0, n_objects)`.
    #[error("object index {index} out of range for {len} objects")]
    IndexOutOfRange { index: usize, len: usize },
    /// Data or metadata that cannot describe a valid information table.
    #[error("malformed dataset: {0}")]
    Format(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, Error>;
