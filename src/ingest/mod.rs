//! Raw-row ingestion and timestamp normalization.

mod normalize;

pub use normalize::{normalize, parse_timestamp, IngestReport};
