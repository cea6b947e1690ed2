//! Adapter error types

use thiserror::Error;

use crate::rpc::RpcError;

/// Errors that can occur while talking to a tool provider
#[derive(Error, Debug)]
pub enum AdapterError {
    /// `initialize` or `tools/list` failed; the provider contributes no tools
    #[error("Discovery failed for {provider}: {source}")]
    Discovery {
        provider: String,
        #[source]
        source: RpcError,
    },

    /// A `tools/call` exchange failed below the JSON-RPC layer
    #[error("{provider} unavailable: {source}")]
    Transport {
        provider: String,
        #[source]
        source: RpcError,
    },

    /// A mock adapter configured to fail
    #[error("{provider} unavailable: {message}")]
    Unavailable { provider: String, message: String },
}

impl AdapterError {
    pub fn discovery(provider: impl Into<String>, source: RpcError) -> Self {
        Self::Discovery {
            provider: provider.into(),
            source,
        }
    }

    pub fn transport(provider: impl Into<String>, source: RpcError) -> Self {
        Self::Transport {
            provider: provider.into(),
            source,
        }
    }

    pub fn unavailable(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unavailable {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

pub type AdapterResult<T> = Result<T, AdapterError>;
