//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod command_mode;
mod match_mode;
mod position;

pub use command_mode::*;
pub use match_mode::*;
pub use position::*;
