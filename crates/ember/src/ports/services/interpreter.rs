//! Interpreter Port
//!
//! Abstract interface for the remote command-interpretation service.
//! The HTTP implementation lives in `crate::services`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{EmberError, ExecutionRecord, HistoryEntry};

/// Roster entry sent with every interpretation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildSnapshot {
    pub name: String,
    pub functions: Vec<String>,
}

/// Body of `/process_command`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessCommandRequest {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_history: Option<Vec<HistoryEntry>>,
    pub child_entities: Vec<ChildSnapshot>,
}

/// Reply of `/process_command`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessCommandResponse {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_details: Option<Vec<ExecutionRecord>>,
}

impl ProcessCommandResponse {
    /// Execution records, empty when the service sent none
    pub fn records(&self) -> &[ExecutionRecord] {
        self.execution_details.as_deref().unwrap_or_default()
    }
}

/// Remote interpreter interface
///
/// Every call may fail with a transport, status or parse error; callers in
/// the router and session convert those to user-facing text.
#[async_trait]
pub trait Interpreter: Send + Sync {
    /// Capability labels a child may be assigned
    async fn available_functions(&self) -> Result<Vec<String>, EmberError>;

    /// Capability labels mapped to their category
    async fn function_categories(&self) -> Result<BTreeMap<String, String>, EmberError>;

    /// Interpret a free-text command against the roster
    async fn process_command(
        &self,
        request: &ProcessCommandRequest,
    ) -> Result<ProcessCommandResponse, EmberError>;

    /// Run one capability and return its raw result
    async fn execute_function(&self, function_name: &str, args: &Value)
        -> Result<Value, EmberError>;
}
