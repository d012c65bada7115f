//! Domain Errors
//!
//! Error types for registry, routing and interpreter operations.

use std::time::Duration;

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum EmberError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Command is empty")]
    EmptyCommand,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("HTTP error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{message}")]
    Execution { function: String, message: String },

    #[error("No command heard within {0:?}")]
    ListenTimeout(Duration),

    #[error("Capture error: {0}")]
    Capture(String),
}

impl EmberError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_error_displays_remote_message() {
        let err = EmberError::Execution {
            function: "add_numbers".to_string(),
            message: "invalid literal for int()".to_string(),
        };
        assert_eq!(err.to_string(), "invalid literal for int()");
    }

    #[test]
    fn test_not_found_formats_id() {
        let err = EmberError::not_found("child", 3);
        assert_eq!(err.to_string(), "Entity not found: child with id 3");
    }
}
