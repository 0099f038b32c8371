//! Event logging over a sink handle.
//!
//! `EventLogger` assembles structured records for an explicit sink; the
//! free functions log through a process-wide default logger inside a
//! metadata scope.

pub mod event;
pub mod helpers;

pub use event::*;
pub use helpers::*;
