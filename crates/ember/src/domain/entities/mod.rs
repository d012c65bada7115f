//! Domain Entities
//!
//! - MainEntity / ChildEntity: the two-level entity tree
//! - CommandHistory: conversation turns kept by the main entity
//! - ExecutionRecord: capability invocation reported by the interpreter

mod entity;
mod execution;
mod history;

pub use entity::*;
pub use execution::*;
pub use history::*;
