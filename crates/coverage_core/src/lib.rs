#![forbid(unsafe_code)]

pub mod estimate;
pub mod format;
