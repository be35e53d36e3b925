//! System helpers: disks, host facts, environment, processes and paths.
//!
//! `run_command`, `change_directory`, `ensure_directory` and
//! `create_temp_file` have side effects; everything else only reads.

pub mod command;
pub mod disk;
pub mod env;
pub mod info;
pub mod paths;

pub use command::*;
pub use disk::*;
pub use env::*;
pub use info::*;
pub use paths::*;
