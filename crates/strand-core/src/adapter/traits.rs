//! Provider adapter trait definition

use async_trait::async_trait;

use super::error::AdapterResult;
use crate::types::{ExtractedArguments, ToolDescriptor};

/// What a provider answered to a `tools/call`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// Text content of a successful call
    Text(String),
    /// JSON-RPC error object, or a result flagged `isError`
    Rejected { code: Option<i64>, message: String },
}

impl CallOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, CallOutcome::Rejected { .. })
    }

    /// Text shown to the user
    pub fn render(&self) -> String {
        match self {
            CallOutcome::Text(text) => text.clone(),
            CallOutcome::Rejected { message, .. } => format!("Error: {}", message),
        }
    }
}

impl std::fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// A source of tools reachable over some transport
///
/// The stdio implementation spawns a process per exchange; a backend that
/// keeps a connection open can implement the same contract.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Provider id, the prefix of every qualified tool name it owns
    fn provider_id(&self) -> &str;

    /// Handshake and list the provider's tools
    async fn discover(&self) -> AdapterResult<Vec<ToolDescriptor>>;

    /// Invoke a tool by its original (unqualified) name
    async fn call(&self, tool: &str, arguments: &ExtractedArguments) -> AdapterResult<CallOutcome>;
}
