//! Terminal presenter

use colored::Colorize;
use ember::{ExecutionRecord, Position, Presenter};

/// Prints replies to stdout; movement only when verbose
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPresenter {
    pub show_moves: bool,
}

impl Presenter for TerminalPresenter {
    fn show_result(&self, text: &str, records: &[ExecutionRecord]) {
        println!("{} {}", "🔥".red(), text);
        if !records.is_empty() {
            println!("  {}", "Execution Details:".bold());
            for record in records {
                println!("    {}", record.to_string().dimmed());
            }
        }
    }

    fn entity_moved(&self, position: Position) {
        if self.show_moves {
            println!("  {}", format!("↳ moving to {}", position).dimmed());
        }
    }
}
