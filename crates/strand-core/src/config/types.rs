//! Provider launch specs and orchestrator settings

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_CALL_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_CANDIDATES: usize = 5;
const DEFAULT_HISTORY_LIMIT: usize = 10;

/// How to launch one tool provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider id, used as the prefix of qualified tool names
    pub id: String,
    /// Executable to spawn for every exchange
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Working directory for the provider process
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    /// Provider serves live/real data (preferred for train searches)
    #[serde(default)]
    pub live: bool,
    /// Per-provider override of `Settings::call_timeout_secs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ProviderConfig {
    pub fn new(id: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            command: command.into(),
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
            live: false,
            timeout_secs: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn live(mut self) -> Self {
        self.live = true;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Effective exchange timeout for this provider
    pub fn timeout(&self, settings: &Settings) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(settings.call_timeout_secs))
    }
}

/// Orchestrator-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Upper bound on a single provider exchange
    pub call_timeout_secs: u64,
    /// Shortlist size returned by the relevance engine
    pub max_candidates: usize,
    /// Default number of entries shown by `history`
    pub history_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            call_timeout_secs: DEFAULT_CALL_TIMEOUT_SECS,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}
