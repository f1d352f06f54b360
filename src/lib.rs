//! # wattgrid
//!
//! Regularization and anomaly detection for irregularly-sampled
//! power-consumption time series.
//!
//! The pipeline takes raw timestamp/value rows from an
//! externally-parsed spreadsheet export, repairs them onto a fixed
//! 15-minute grid, fills short gaps by bounded linear interpolation,
//! and derives outlier sets and periodic load profiles:
//!
//! ```text
//! raw rows -> NormalizedSeries -> RegularSeries -> filled series
//!                                                   |-> local outliers (diff z-score)
//!                                                   |-> block outliers (daily IQR)
//!                                                   '-> aggregates and profiles
//! ```
//!
//! Spreadsheet parsing, seasonal decomposition, forecasting, and
//! plotting/export live in external collaborators; the crate consumes
//! pre-selected (timestamp, value) pairs and exposes in-memory
//! results.
//!
//! ## Example
//!
//! ```
//! use wattgrid::prelude::*;
//!
//! let rows = vec![
//!     RawSample::new("01/01/2024 00:00", 10.0),
//!     RawSample::new("01/01/2024 00:15", 12.0),
//!     RawSample::new("01/01/2024 00:45", 16.0),
//! ];
//! let output = wattgrid::pipeline::run(&rows, &PipelineConfig::default()).unwrap();
//!
//! // The 00:30 point is a one-step gap, filled by interpolation.
//! assert_eq!(output.filled.len(), 4);
//! assert_eq!(output.filled.values()[2], Some(14.0));
//! ```

pub mod core;
pub mod detection;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod profile;
pub mod regularize;
pub mod utils;

pub use error::{PipelineError, Result};

pub mod prelude {
    pub use crate::core::{GapRun, NormalizedSeries, RawSample, RegularSeries};
    pub use crate::detection::{DailyIqrConfig, DailyIqrResult, DiffZscoreConfig, DiffZscoreResult};
    pub use crate::error::{PipelineError, Result};
    pub use crate::pipeline::{PipelineConfig, PipelineOutput, PipelineSummary};
}
