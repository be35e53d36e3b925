//! scriptkit - independent helper functions for everyday scripting.
//!
//! Each helper takes explicit arguments and returns a value or a
//! [`KitError`]. Helpers that touch the filesystem or the process live in
//! [`files`] and [`system`]; everything else is pure.

pub mod app;
pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod files;
pub mod system;
pub mod test_utils;
pub mod text;
pub mod urls;
pub mod utils;

pub use error::{KitError, Result};
