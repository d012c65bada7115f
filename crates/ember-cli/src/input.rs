//! Line input from stdin
//!
//! One reader serves both the REPL prompt and `/talk`, so a line typed
//! while listening is never lost to a second reader.

use async_trait::async_trait;
use ember::{CommandCapture, EmberError};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

pub struct StdinLines {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinLines {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Next line, `None` at end of input
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.lines.next_line().await
    }
}

#[async_trait]
impl CommandCapture for StdinLines {
    async fn capture(&mut self) -> Result<Option<String>, EmberError> {
        self.next_line()
            .await
            .map_err(|e| EmberError::Capture(e.to_string()))
    }
}

impl Default for StdinLines {
    fn default() -> Self {
        Self::new()
    }
}
