//! Session Layer
//!
//! Session-scoped state: the entity registry and the `Session` context
//! object that drives routing, interpretation and listening.

mod context;
mod registry;

pub use context::*;
pub use registry::*;
