//! In-memory configuration provider

use parking_lot::RwLock;
use async_trait::async_trait;
use super::traits::{ConfigProvider, ConfigError};
use super::types::{ProviderConfig, Settings};

/// In-memory configuration provider for testing
#[derive(Debug, Default)]
pub struct MemoryConfigProvider {
    providers: RwLock<Vec<ProviderConfig>>,
    settings: RwLock<Settings>,
}

impl MemoryConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_providers(providers: Vec<ProviderConfig>) -> Self {
        Self {
            providers: RwLock::new(providers),
            settings: RwLock::new(Settings::default()),
        }
    }

    pub fn set_settings(&self, settings: Settings) {
        *self.settings.write() = settings;
    }
}

#[async_trait]
impl ConfigProvider for MemoryConfigProvider {
    async fn get_providers(&self) -> Vec<ProviderConfig> {
        self.providers.read().clone()
    }

    async fn get_settings(&self) -> Settings {
        self.settings.read().clone()
    }

    async fn add_provider(&self, config: ProviderConfig) -> Result<(), ConfigError> {
        let mut guard = self.providers.write();
        if guard.iter().any(|p| p.id.eq_ignore_ascii_case(&config.id)) {
            return Err(ConfigError::ProviderExists(config.id.clone()));
        }
        guard.push(config);
        Ok(())
    }
}
