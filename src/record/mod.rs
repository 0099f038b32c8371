//! Log records and sinks.
//!
//! Assembled records carry the message, structured fields, and the
//! emitting unit's context map; sinks decide what to do with them.

pub mod emit;
pub mod sink;

pub use emit::*;
pub use sink::*;
