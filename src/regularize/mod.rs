//! Grid construction and gap repair.

mod gapfill;
mod grid;

pub use gapfill::{fill_gaps, GapFillReport};
pub use grid::to_grid;
