//! File-based configuration provider (YAML)
//!
//! Supports user-level (~/.config/strand/agent.yaml) and workspace-level
//! (.config/strand/agent.yaml) config.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::traits::{ConfigError, ConfigProvider, ConfigResult};
use super::types::{ProviderConfig, Settings};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConfigFile {
    /// Tool providers to discover at startup, in discovery order
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,

    #[serde(default)]
    pub settings: Settings,
}

/// Config level (user or workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    /// User-level config (~/.config/strand/agent.yaml)
    User,
    /// Workspace-level config (.config/strand/agent.yaml in workspace root)
    Workspace,
}

/// File-based configuration provider
///
/// # Example
///
/// ```no_run
/// use strand_core::config::FileConfigProvider;
///
/// let user_config = FileConfigProvider::user();
/// let workspace_config = FileConfigProvider::workspace("/path/to/workspace");
/// ```
pub struct FileConfigProvider {
    path: PathBuf,
    level: ConfigLevel,
    cache: RwLock<Option<ConfigFile>>,
}

impl FileConfigProvider {
    pub fn new(path: impl Into<PathBuf>, level: ConfigLevel) -> Self {
        Self {
            path: path.into(),
            level,
            cache: RwLock::new(None),
        }
    }

    /// User-level config provider (~/.config/strand/agent.yaml)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("strand").join("agent.yaml"), ConfigLevel::User)
    }

    /// Workspace-level config provider (.config/strand/agent.yaml)
    pub fn workspace(workspace_root: impl AsRef<Path>) -> Self {
        let path = workspace_root.as_ref().join(".config").join("strand").join("agent.yaml");
        Self::new(path, ConfigLevel::Workspace)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> ConfigLevel {
        self.level
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> ConfigResult<ConfigFile> {
        if !self.path.exists() {
            return Ok(ConfigFile::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    fn save(&self, config: &ConfigFile) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(config)?;
        fs::write(&self.path, content)?;

        *self.cache.write() = Some(config.clone());
        Ok(())
    }

    /// Cached config, loading it on first use
    pub fn config(&self) -> ConfigResult<ConfigFile> {
        if let Some(config) = self.cache.read().as_ref() {
            return Ok(config.clone());
        }

        let config = self.load()?;
        *self.cache.write() = Some(config.clone());
        Ok(config)
    }

    /// Reload config from disk (invalidate cache)
    pub fn reload(&self) -> ConfigResult<ConfigFile> {
        let config = self.load()?;
        *self.cache.write() = Some(config.clone());
        Ok(config)
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .field("level", &self.level)
            .field("exists", &self.exists())
            .finish()
    }
}

#[async_trait]
impl ConfigProvider for FileConfigProvider {
    async fn get_providers(&self) -> Vec<ProviderConfig> {
        self.config().map(|c| c.providers).unwrap_or_default()
    }

    async fn get_settings(&self) -> Settings {
        self.config().map(|c| c.settings).unwrap_or_default()
    }

    async fn add_provider(&self, config: ProviderConfig) -> ConfigResult<()> {
        let mut file_config = self.config()?;
        if file_config.providers.iter().any(|p| p.id.eq_ignore_ascii_case(&config.id)) {
            return Err(ConfigError::ProviderExists(config.id.clone()));
        }

        file_config.providers.push(config);
        self.save(&file_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_config_provider() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("agent.yaml");
        let provider = FileConfigProvider::new(&path, ConfigLevel::User);

        assert!(!provider.exists());
        assert!(provider.get_providers().await.is_empty());
        assert_eq!(provider.get_settings().await, Settings::default());

        provider
            .add_provider(ProviderConfig::new("greeter", "python3").with_args(["mcp_server.py"]))
            .await
            .unwrap();

        assert!(provider.exists());
        provider.reload().unwrap();
        assert_eq!(provider.get_providers().await.len(), 1);
    }

    #[tokio::test]
    async fn test_reads_handwritten_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("agent.yaml");
        fs::write(
            &path,
            r#"
providers:
  - id: real_trainline
    command: ./venv/bin/python
    args: [real_trainline_mcp_server.py]
    live: true
    timeout_secs: 45
  - id: multi_hotels
    command: ./venv/bin/python
    args: [multi_hotel_api_server.py]
settings:
  call_timeout_secs: 20
"#,
        )
        .unwrap();

        let provider = FileConfigProvider::new(&path, ConfigLevel::Workspace);
        let providers = provider.get_providers().await;
        assert_eq!(providers.len(), 2);
        assert_eq!(providers[0].id, "real_trainline");
        assert!(providers[0].live);
        assert_eq!(providers[0].timeout_secs, Some(45));
        assert!(!providers[1].live);

        let settings = provider.get_settings().await;
        assert_eq!(settings.call_timeout_secs, 20);
        // Unspecified settings keep their defaults
        assert_eq!(settings.max_candidates, 5);
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("agent.yaml");
        fs::write(&path, "providers: [oops").unwrap();

        let provider = FileConfigProvider::new(&path, ConfigLevel::User);
        assert!(matches!(provider.config(), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_workspace_path() {
        let provider = FileConfigProvider::workspace("/tmp/project");
        assert_eq!(provider.level(), ConfigLevel::Workspace);
        assert!(provider.path().ends_with(".config/strand/agent.yaml"));
    }
}
