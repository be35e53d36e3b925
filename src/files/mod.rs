//! File helpers.
//!
//! Read-only helpers (`find_files`, `file_info`, `find_duplicates`,
//! `directory_size`) never touch the filesystem beyond reading. The
//! mutating ones (`batch_rename`, `organize_by_extension`, `safe_delete`)
//! validate their whole plan before the first change, so a failure leaves
//! the directory as it was.

pub mod info;
pub mod organize;
pub mod rename;
pub mod search;
pub mod trash;

pub use info::*;
pub use organize::*;
pub use rename::*;
pub use search::*;
pub use trash::*;
