#![doc = "Grid overlap toolkit public API"]
pub mod cli;
pub mod commands;
mod common;
mod config;
#[cfg(feature = "download")]
mod download;
mod geometry;
mod grid;
mod io;
mod report;
mod types;

#[doc(inline)]
pub use config::Params;

#[doc(inline)]
pub use geometry::{compute_overlaps, OverlapError};

#[doc(inline)]
pub use grid::{load_allow_list, load_coarse_grid, load_fine_grid, RingFilter};

#[doc(inline)]
pub use report::{format_record, write_report, REPORT_HEADER};

#[doc(inline)]
pub use types::{pathrow_id, Anchor, GeometryRecord, GridKind, OverlapRecord};
