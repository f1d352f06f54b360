//! Core data structures for the regularization pipeline.

mod series;

pub use series::{GapRun, NormalizedSeries, RawSample, RegularSeries};
