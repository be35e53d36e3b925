//! URL helpers that never touch the network: query strings, parsing,
//! building and validation.

pub mod parse;
pub mod query;

pub use parse::*;
pub use query::*;
