//! Command Capture Port
//!
//! A source of spoken (or typed) commands. `Session::listen` bounds each
//! capture with a listening window.

use async_trait::async_trait;

use crate::domain::EmberError;

#[async_trait]
pub trait CommandCapture: Send {
    /// Wait for the next utterance. `Ok(None)` means the source is closed.
    async fn capture(&mut self) -> Result<Option<String>, EmberError>;
}
