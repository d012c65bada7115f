//! Service Ports
//!
//! Abstract interfaces for external services.

mod capture;
mod interpreter;
mod presenter;

pub use capture::*;
pub use interpreter::*;
pub use presenter::*;
