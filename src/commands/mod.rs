#[cfg(feature = "download")]
pub mod download;
pub mod overlap;
