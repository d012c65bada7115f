//! Presenter Port
//!
//! Where results and entity movement are shown. The CLI prints to the
//! terminal; tests record the calls.

use crate::domain::{ExecutionRecord, Position};

pub trait Presenter: Send + Sync {
    /// Show a reply, with any execution records that produced it
    fn show_result(&self, text: &str, records: &[ExecutionRecord]);

    /// The main entity moved while dispatching
    fn entity_moved(&self, _position: Position) {}
}

/// Presenter that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPresenter;

impl Presenter for SilentPresenter {
    fn show_result(&self, _text: &str, _records: &[ExecutionRecord]) {}
}
