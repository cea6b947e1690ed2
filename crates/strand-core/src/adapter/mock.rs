//! Mock adapter for testing
//!
//! Serves a fixed tool list and answers calls deterministically without
//! spawning processes. Every call is recorded so tests can assert on what the
//! pipeline sent.

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{AdapterError, AdapterResult};
use super::traits::{CallOutcome, ProviderAdapter};
use crate::types::{ExtractedArguments, ToolDescriptor};

/// Mock response mode
#[derive(Debug, Clone, Default)]
pub enum MockMode {
    /// Answer with the tool name and its arguments
    #[default]
    Echo,
    /// Answer every call with a JSON-RPC error object
    RpcError { code: i64, message: String },
    /// Fail every exchange as if the process crashed
    TransportFailure(String),
}

/// One recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub tool: String,
    pub arguments: ExtractedArguments,
}

/// In-process provider for tests and demos
pub struct MockAdapter {
    id: String,
    tools: Vec<ToolDescriptor>,
    mode: MockMode,
    fail_discovery: bool,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockAdapter {
    /// Create an echoing mock owning `tools`
    ///
    /// Descriptors are re-qualified under `id`.
    pub fn new(id: impl Into<String>, tools: Vec<ToolDescriptor>) -> Self {
        let id = id.into();
        let tools = tools
            .into_iter()
            .map(|t| {
                let live = t.live;
                ToolDescriptor::new(&id, t.original_name, t.description, t.parameter_schema).with_live(live)
            })
            .collect();
        Self {
            id,
            tools,
            mode: MockMode::Echo,
            fail_discovery: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_mode(mut self, mode: MockMode) -> Self {
        self.mode = mode;
        self
    }

    /// Make `discover` fail, as a provider that never starts would
    pub fn failing_discovery(mut self) -> Self {
        self.fail_discovery = true;
        self
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl ProviderAdapter for MockAdapter {
    fn provider_id(&self) -> &str {
        &self.id
    }

    async fn discover(&self) -> AdapterResult<Vec<ToolDescriptor>> {
        if self.fail_discovery {
            return Err(AdapterError::unavailable(&self.id, "mock discovery failure"));
        }
        Ok(self.tools.clone())
    }

    async fn call(&self, tool: &str, arguments: &ExtractedArguments) -> AdapterResult<CallOutcome> {
        self.calls.lock().push(RecordedCall {
            tool: tool.to_string(),
            arguments: arguments.clone(),
        });

        match &self.mode {
            MockMode::Echo => Ok(CallOutcome::Text(format!("{} {}", tool, arguments))),
            MockMode::RpcError { code, message } => Ok(CallOutcome::Rejected {
                code: Some(*code),
                message: message.clone(),
            }),
            MockMode::TransportFailure(message) => Err(AdapterError::unavailable(&self.id, message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParameterSchema;

    fn greet() -> ToolDescriptor {
        ToolDescriptor::new("x", "greet", "Greets a person by their name.", ParameterSchema::default())
    }

    #[tokio::test]
    async fn test_requalifies_tools() {
        let mock = MockAdapter::new("greeter", vec![greet()]);
        let tools = mock.discover().await.unwrap();
        assert_eq!(tools[0].qualified_name, "greeter.greet");
        assert_eq!(tools[0].provider_id, "greeter");
    }

    #[tokio::test]
    async fn test_echo_records_calls() {
        let mock = MockAdapter::new("greeter", vec![greet()]);
        let args = ExtractedArguments::new().with("name", "Alice");
        let outcome = mock.call("greet", &args).await.unwrap();
        assert_eq!(outcome.render(), "greet {name=Alice}");
        assert_eq!(mock.calls(), vec![RecordedCall { tool: "greet".into(), arguments: args }]);
    }

    #[tokio::test]
    async fn test_failure_modes() {
        let rejecting = MockAdapter::new("greeter", vec![greet()]).with_mode(MockMode::RpcError {
            code: -32601,
            message: "Tool not found: greet".into(),
        });
        let outcome = rejecting.call("greet", &ExtractedArguments::new()).await.unwrap();
        assert_eq!(outcome.render(), "Error: Tool not found: greet");

        let down = MockAdapter::new("greeter", vec![greet()]).with_mode(MockMode::TransportFailure("crashed".into()));
        assert!(down.call("greet", &ExtractedArguments::new()).await.is_err());

        let silent = MockAdapter::new("greeter", vec![greet()]).failing_discovery();
        assert!(silent.discover().await.is_err());
    }
}
