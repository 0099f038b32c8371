//! Structured field construction.
//!
//! Encodes values to JSON and turns them into log record fields.

pub mod flatten;

pub use flatten::*;
