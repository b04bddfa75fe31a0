mod coarse;
mod fine;

pub use coarse::{load_coarse_grid, RingFilter};
pub use fine::{load_allow_list, load_fine_grid};
