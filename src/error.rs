//! Error types for the wattgrid pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while regularizing a series.
///
/// Per-row problems (unparsable timestamps, null values) are recovered
/// locally and surface only as counters; these variants cover the
/// conditions that make a whole stage undefined.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// No parseable rows survived normalization.
    #[error("no valid rows after normalization ({rows_seen} raw rows seen)")]
    EmptyInput { rows_seen: usize },

    /// Timestamp and value sequences have different lengths.
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// Timestamps are not strictly increasing.
    #[error("timestamps must be strictly increasing (violation at index {index})")]
    UnorderedTimestamps { index: usize },

    /// Grid spacing is inconsistent with the declared step.
    #[error("irregular grid spacing at index {index}")]
    IrregularSpacing { index: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
