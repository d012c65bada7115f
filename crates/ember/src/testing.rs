//! Test doubles shared by the unit tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::{EmberError, ExecutionRecord, Position};
use crate::ports::{Interpreter, Presenter, ProcessCommandRequest, ProcessCommandResponse};

/// One call seen by `MockInterpreter`
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AvailableFunctions,
    FunctionCategories,
    ProcessCommand(String),
    ExecuteFunction(String, Value),
}

/// Interpreter returning canned answers and recording every call
pub struct MockInterpreter {
    pub available: Vec<String>,
    pub fail: bool,
    pub reply: String,
    pub records: Vec<ExecutionRecord>,
    calls: Mutex<Vec<Call>>,
    requests: Mutex<Vec<ProcessCommandRequest>>,
}

impl MockInterpreter {
    pub fn new(available: &[&str]) -> Self {
        Self {
            available: available.iter().map(|s| s.to_string()).collect(),
            fail: false,
            reply: "done".to_string(),
            records: Vec::new(),
            calls: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(&[])
        }
    }

    pub fn with_reply(mut self, reply: &str, records: Vec<ExecutionRecord>) -> Self {
        self.reply = reply.to_string();
        self.records = records;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<ProcessCommandRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn transport_error(&self) -> EmberError {
        EmberError::Transport("connection refused".to_string())
    }
}

#[async_trait]
impl Interpreter for MockInterpreter {
    async fn available_functions(&self) -> Result<Vec<String>, EmberError> {
        self.record(Call::AvailableFunctions);
        if self.fail {
            return Err(self.transport_error());
        }
        Ok(self.available.clone())
    }

    async fn function_categories(&self) -> Result<BTreeMap<String, String>, EmberError> {
        self.record(Call::FunctionCategories);
        if self.fail {
            return Err(self.transport_error());
        }
        Ok(self
            .available
            .iter()
            .map(|name| (name.clone(), "general".to_string()))
            .collect())
    }

    async fn process_command(
        &self,
        request: &ProcessCommandRequest,
    ) -> Result<ProcessCommandResponse, EmberError> {
        self.record(Call::ProcessCommand(request.command.clone()));
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(self.transport_error());
        }
        Ok(ProcessCommandResponse {
            response: self.reply.clone(),
            execution_details: Some(self.records.clone()),
        })
    }

    async fn execute_function(
        &self,
        function_name: &str,
        args: &Value,
    ) -> Result<Value, EmberError> {
        self.record(Call::ExecuteFunction(function_name.to_string(), args.clone()));
        if self.fail {
            return Err(EmberError::Execution {
                function: function_name.to_string(),
                message: "boom".to_string(),
            });
        }
        Ok(json!(format!("{} ok", function_name)))
    }
}

/// Presenter keeping everything it was shown
#[derive(Default)]
pub struct RecordingPresenter {
    pub results: Mutex<Vec<String>>,
    pub moves: Mutex<Vec<Position>>,
}

impl RecordingPresenter {
    pub fn results(&self) -> Vec<String> {
        self.results.lock().unwrap().clone()
    }

    pub fn moves(&self) -> Vec<Position> {
        self.moves.lock().unwrap().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn show_result(&self, text: &str, _records: &[ExecutionRecord]) {
        self.results.lock().unwrap().push(text.to_string());
    }

    fn entity_moved(&self, position: Position) {
        self.moves.lock().unwrap().push(position);
    }
}
