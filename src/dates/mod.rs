//! Date and time helpers built on `chrono`.
//!
//! Functions take the reference instant or date explicitly. Callers that
//! want "now" pass `chrono::Local::now().naive_local()` themselves.

pub mod business;
pub mod calendar;
pub mod parse;
pub mod relative;

pub use business::*;
pub use calendar::*;
pub use parse::*;
pub use relative::*;
