//! CommandMode - Which pipeline handles a top-level command

use serde::{Deserialize, Serialize};

/// Pipeline selection for top-level commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandMode {
    /// Match children locally and execute their capabilities
    #[default]
    Route,
    /// Send the command and roster to the remote interpreter
    Interpret,
}

impl std::fmt::Display for CommandMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandMode::Route => write!(f, "route"),
            CommandMode::Interpret => write!(f, "interpret"),
        }
    }
}

impl std::str::FromStr for CommandMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "route" => Ok(CommandMode::Route),
            "interpret" => Ok(CommandMode::Interpret),
            _ => Err(format!("Unknown command mode: {}", s)),
        }
    }
}
