//! Command Routing
//!
//! Local selection of the children a command concerns, and sequential
//! delivery to them.

mod matcher;
mod router;

pub use matcher::*;
pub use router::*;
