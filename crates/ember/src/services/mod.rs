//! Infrastructure Services
//!
//! Concrete implementations of the ports that reach outside the process.

mod http_interpreter;

pub use http_interpreter::HttpInterpreter;
