//! Execution Record
//!
//! Informational log entry describing one capability invocation reported
//! by the interpreter.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One capability invocation `{entity, function, args, result}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub entity: String,
    pub function: String,
    #[serde(default)]
    pub args: Value,
    #[serde(default)]
    pub result: Value,
}

impl std::fmt::Display for ExecutionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Entity {} executed function {} with result: {}",
            self.entity,
            self.function,
            value_text(&self.result)
        )?;
        if !self.args.is_null() {
            write!(f, " (Args: {})", self.args)?;
        }
        Ok(())
    }
}

/// Render a JSON value for humans: strings without quotes, the rest as JSON
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
