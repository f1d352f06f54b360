//! Shared utility functions.

pub mod stats;

pub use stats::{mean, population_std_dev, quantile};
