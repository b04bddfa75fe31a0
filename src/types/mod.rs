mod kind;
mod pathrow;
mod record;

pub use kind::GridKind;
pub use pathrow::{pathrow_id, row_of};
pub use record::{Anchor, GeometryRecord, OverlapRecord};
