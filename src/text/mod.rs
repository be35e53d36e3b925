//! Text helpers: extraction, transformation and simple analysis.
//!
//! Every function here is pure. Patterns are compiled once and shared
//! through `LazyLock` statics.

pub mod analysis;
pub mod extract;
pub mod transform;

pub use analysis::*;
pub use extract::*;
pub use transform::*;
