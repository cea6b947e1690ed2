//! Configuration provider trait

use async_trait::async_trait;
use super::types::{ProviderConfig, Settings};

/// Configuration provider abstraction
///
/// Implementations:
/// - `MemoryConfigProvider`: In-memory for testing
/// - `FileConfigProvider`: Reads from YAML file (~/.config/strand/agent.yaml)
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    /// Get all configured tool providers
    async fn get_providers(&self) -> Vec<ProviderConfig>;

    /// Get orchestrator settings
    async fn get_settings(&self) -> Settings;

    /// Add a new provider
    async fn add_provider(&self, config: ProviderConfig) -> Result<(), ConfigError>;
}

/// Errors that can occur during configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Provider already exists: {0}")]
    ProviderExists(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
