//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (interpreter, presentation, input).
//!
//! Implementations of these traits live in `crate::services` and in the
//! CLI crate.

pub mod services;

// Re-exports
pub use services::*;
