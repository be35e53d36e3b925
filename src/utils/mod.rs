//! Small helpers shared by more than one helper module.

pub mod format;
pub mod fs;

pub use format::*;
pub use fs::*;
