mod overlap;

pub use overlap::{compute_overlaps, OverlapError};
