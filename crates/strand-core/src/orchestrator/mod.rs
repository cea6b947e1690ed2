//! Request orchestration
//!
//! The [`Orchestrator`] owns every provider adapter, the tool registry and the
//! conversation history. A request is classified, routed through one of three
//! flows and answered with plain text:
//!
//! ```text
//! request ──▶ Intent::classify ──┬─▶ round trip   (outbound, connection, return, hotel)
//!                                ├─▶ multi-intent (train section, hotel section)
//!                                └─▶ single tool  (rank, extract, call)
//! ```
//!
//! Sub-requests run one after another in that fixed order. Provider failures
//! never abort a request; they become a notice in the affected section.

mod flows;
pub mod trip;

use std::sync::Arc;

use crate::adapter::{AdapterResult, CallOutcome, ProviderAdapter, StdioAdapter};
use crate::config::{ConfigProvider, Settings};
use crate::extract::ParameterExtractor;
use crate::history::{ConversationHistory, Tag};
use crate::intent::Intent;
use crate::logging::SharedLogger;
use crate::tools::ToolRegistry;
use crate::types::{ExtractedArguments, ToolDescriptor};
use crate::{log_error, log_info, log_warn};

pub use trip::{connection_for, Connection, TripPlan};

const USAGE_EXAMPLES: &[&str] = &[
    "Hello, my name is Alice",
    "Calculate 15 * 7 + 3",
    "Find trains from Leeds to London Kings Cross on 2025-12-15",
    "Find hotels in Bath for December 18-19",
    "Plan a trip from Leeds to East Croydon on 15/12/2025 returning 17/12/2025 with a hotel",
];

/// Routes free-text requests to discovered tools
pub struct Orchestrator {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    registry: ToolRegistry,
    extractor: ParameterExtractor,
    history: ConversationHistory,
    settings: Settings,
    logger: SharedLogger,
}

impl Orchestrator {
    /// Create an orchestrator with no providers
    pub fn new(settings: Settings, logger: SharedLogger) -> Self {
        Self {
            adapters: Vec::new(),
            registry: ToolRegistry::new(logger.clone()),
            extractor: ParameterExtractor::new(),
            history: ConversationHistory::new(),
            settings,
            logger,
        }
    }

    /// Pin the extractor's reference day
    pub fn with_extractor(mut self, extractor: ParameterExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Start a stdio adapter for every configured provider and discover its tools
    ///
    /// A provider that fails discovery is logged and skipped.
    pub async fn connect(config: &dyn ConfigProvider, logger: SharedLogger) -> Self {
        let settings = config.get_settings().await;
        let mut orchestrator = Self::new(settings.clone(), logger.clone());

        for provider in config.get_providers().await {
            let adapter = StdioAdapter::new(&provider, &settings, logger.clone());
            if let Err(e) = orchestrator.add_provider(Arc::new(adapter)).await {
                log_warn!(logger, "[Orchestrator] Skipping provider {}: {}", provider.id, e);
            }
        }

        if orchestrator.registry.is_empty() {
            log_error!(logger, "[Orchestrator] No provider offered any tools");
        }
        log_info!(
            logger,
            "[Orchestrator] Ready with {} tools from {} providers",
            orchestrator.registry.len(),
            orchestrator.adapters.len()
        );
        orchestrator
    }

    /// Discover an adapter's tools and keep it for later calls
    ///
    /// Returns the number of tools registered. An adapter that fails
    /// discovery, or registers no tools, is dropped and contributes nothing.
    pub async fn add_provider(&mut self, adapter: Arc<dyn ProviderAdapter>) -> AdapterResult<usize> {
        let tools = adapter.discover().await?;
        let added = self.registry.register(adapter.provider_id(), tools);
        if added == 0 {
            log_warn!(self.logger, "[Orchestrator] {} has no tools available", adapter.provider_id());
        } else {
            self.adapters.push(adapter);
        }
        Ok(added)
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Ids of providers that registered at least one tool
    pub fn provider_ids(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.provider_id()).collect()
    }

    /// Answer one request and record the exchange
    pub async fn process_request(&mut self, text: &str) -> String {
        self.history.record_user(text);

        let intent = Intent::classify(text);
        log_info!(self.logger, "[Orchestrator] Intent: {:?}", intent);

        let (response, tags) = match intent {
            Intent::RoundTrip => {
                let (response, mut tags) = self.round_trip(text).await;
                tags.insert(0, Tag::RoundTrip);
                (response, tags)
            }
            Intent::MultiIntent => {
                let (response, mut tags) = self.multi_intent(text).await;
                tags.insert(0, Tag::MultiIntent);
                (response, tags)
            }
            Intent::SingleTool => self.single_tool(text).await,
        };

        self.history.record_agent(response.clone(), tags);
        response
    }

    /// Call a tool by qualified name with caller-supplied arguments
    pub async fn execute_tool(&self, qualified_name: &str, arguments: &ExtractedArguments) -> String {
        let Some(tool) = self.registry.get(qualified_name) else {
            return format!("Tool '{}' not found", qualified_name);
        };
        self.invoke(&tool, arguments).await
    }

    /// Tools grouped by provider, followed by example requests
    pub fn capabilities(&self) -> String {
        let mut out = String::from("Strand Agent Capabilities:\n");
        out.push_str(&"=".repeat(40));
        out.push('\n');

        for (provider, tools) in self.registry.by_provider() {
            out.push_str(&format!("\n{} provider:\n", provider.to_uppercase()));
            for tool in tools {
                out.push_str(&format!("  • {}: {}\n", tool.original_name, tool.description));
            }
        }

        out.push_str("\nUsage examples:\n");
        for example in USAGE_EXAMPLES {
            out.push_str(&format!("  • '{}'\n", example));
        }
        out
    }

    fn adapter_for(&self, tool: &ToolDescriptor) -> Option<&Arc<dyn ProviderAdapter>> {
        self.adapters.iter().find(|a| a.provider_id() == tool.provider_id)
    }

    /// Call a tool and render the outcome, or a notice if the provider failed
    async fn invoke(&self, tool: &ToolDescriptor, arguments: &ExtractedArguments) -> String {
        let Some(adapter) = self.adapter_for(tool) else {
            return format!("Provider '{}' not available", tool.provider_id);
        };

        log_info!(
            self.logger,
            "[Orchestrator] Calling {} with {}",
            tool.qualified_name,
            arguments
        );
        match adapter.call(&tool.original_name, arguments).await {
            Ok(CallOutcome::Text(text)) if text.trim().is_empty() => {
                log_warn!(self.logger, "[Orchestrator] {} returned no content", tool.qualified_name);
                format!("Failed to execute {}: no content returned", tool.qualified_name)
            }
            Ok(outcome) => outcome.render(),
            Err(e) => {
                log_warn!(self.logger, "[Orchestrator] {} failed: {}", tool.qualified_name, e);
                format!("Failed to execute {}: {}", tool.qualified_name, e)
            }
        }
    }
}
