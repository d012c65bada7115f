//! HTTP client for the remote command interpreter.
//!
//! Talks JSON over plain HTTP: no authentication and no versioning. Any
//! transport failure, non-success status or unexpected body becomes an
//! `EmberError`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::EmberError;
use crate::ports::{Interpreter, ProcessCommandRequest, ProcessCommandResponse};

const AVAILABLE_FUNCTIONS_PATH: &str = "/get_available_functions";
const FUNCTION_CATEGORIES_PATH: &str = "/get_functions_with_categories";
const PROCESS_COMMAND_PATH: &str = "/process_command";
const EXECUTE_FUNCTION_PATH: &str = "/execute_function";

/// Interpreter reached over HTTP
#[derive(Clone)]
pub struct HttpInterpreter {
    client: Client,
    base_url: String,
}

// ============================================
// Request/Response Types
// ============================================

#[derive(Serialize)]
struct ExecuteFunctionRequest<'a> {
    #[serde(rename = "functionName")]
    function_name: &'a str,
    args: &'a Value,
}

#[derive(Deserialize)]
struct ExecuteFunctionResponse {
    #[serde(default)]
    result: Value,
}

impl HttpInterpreter {
    /// Creates a client for the service at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, EmberError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|err| EmberError::Transport(err.to_string()))?;
        parse_json(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, EmberError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|err| EmberError::Transport(err.to_string()))?;
        parse_json(response).await
    }
}

#[async_trait]
impl Interpreter for HttpInterpreter {
    async fn available_functions(&self) -> Result<Vec<String>, EmberError> {
        let functions: Vec<String> = self.get_json(AVAILABLE_FUNCTIONS_PATH).await?;
        tracing::debug!("Loaded {} available functions", functions.len());
        Ok(functions)
    }

    async fn function_categories(&self) -> Result<BTreeMap<String, String>, EmberError> {
        self.get_json(FUNCTION_CATEGORIES_PATH).await
    }

    async fn process_command(
        &self,
        request: &ProcessCommandRequest,
    ) -> Result<ProcessCommandResponse, EmberError> {
        tracing::debug!("Sending command to interpreter: {}", request.command);
        self.post_json(PROCESS_COMMAND_PATH, request).await
    }

    async fn execute_function(
        &self,
        function_name: &str,
        args: &Value,
    ) -> Result<Value, EmberError> {
        let request = ExecuteFunctionRequest {
            function_name,
            args,
        };
        let response: ExecuteFunctionResponse = self
            .post_json(EXECUTE_FUNCTION_PATH, &request)
            .await
            .map_err(|err| match err {
                EmberError::Status { message, .. } => EmberError::Execution {
                    function: function_name.to_string(),
                    message,
                },
                other => other,
            })?;
        Ok(response.result)
    }
}

// ============================================
// Helper Functions
// ============================================

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, EmberError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        return Err(map_http_error(status, body));
    }

    response
        .json()
        .await
        .map_err(|err| EmberError::Parse(err.to_string()))
}

/// Prefer the service's `{"error": "..."}` text over the raw body
fn map_http_error(status: StatusCode, body: String) -> EmberError {
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or(body);

    EmberError::Status {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_http_error_extracts_error_field() {
        let err = map_http_error(
            StatusCode::BAD_REQUEST,
            r#"{"error": "Function nope not found"}"#.to_string(),
        );
        match err {
            EmberError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Function nope not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_map_http_error_falls_back_to_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert_eq!(err.to_string(), "HTTP error (502): upstream down");
    }

    #[test]
    fn test_execute_request_wire_names() {
        let args = json!({"command": "add 2 and 3"});
        let body = serde_json::to_value(ExecuteFunctionRequest {
            function_name: "add_numbers",
            args: &args,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"functionName": "add_numbers", "args": {"command": "add 2 and 3"}})
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let interpreter = HttpInterpreter::new("http://localhost:5000/");
        assert_eq!(interpreter.url(PROCESS_COMMAND_PATH), "http://localhost:5000/process_command");
    }
}
