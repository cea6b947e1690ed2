//! Tool registry
//!
//! Holds every discovered tool under its qualified name, in discovery order.

use std::collections::HashSet;

use parking_lot::RwLock;

use crate::logging::SharedLogger;
use crate::types::ToolDescriptor;

/// Registry of discovered tools
pub struct ToolRegistry {
    /// Tools in discovery order
    tools: RwLock<Vec<ToolDescriptor>>,
    /// Qualified names already taken
    names: RwLock<HashSet<String>>,
    logger: SharedLogger,
}

impl ToolRegistry {
    pub fn new(logger: SharedLogger) -> Self {
        Self {
            tools: RwLock::new(Vec::new()),
            names: RwLock::new(HashSet::new()),
            logger,
        }
    }

    /// Register a provider's tools
    ///
    /// Registration is additive. A qualified name that is already present is
    /// skipped with a warning and the first registration stays. Returns the
    /// number of tools added.
    pub fn register(&self, provider_id: &str, descriptors: Vec<ToolDescriptor>) -> usize {
        let mut tools = self.tools.write();
        let mut names = self.names.write();
        let mut added = 0;

        for tool in descriptors {
            if tool.provider_id != provider_id {
                self.logger.warn(&format!(
                    "[ToolRegistry] Skipping {}: owned by {}, not {}",
                    tool.qualified_name, tool.provider_id, provider_id
                ));
                continue;
            }
            if !names.insert(tool.qualified_name.clone()) {
                self.logger.warn(&format!(
                    "[ToolRegistry] Duplicate tool {} ignored",
                    tool.qualified_name
                ));
                continue;
            }
            tools.push(tool);
            added += 1;
        }

        self.logger.info(&format!(
            "[ToolRegistry] Registered {} tools from {}",
            added, provider_id
        ));
        added
    }

    /// All tools in discovery order
    pub fn all(&self) -> Vec<ToolDescriptor> {
        self.tools.read().clone()
    }

    pub fn get(&self, qualified_name: &str) -> Option<ToolDescriptor> {
        self.tools
            .read()
            .iter()
            .find(|t| t.qualified_name == qualified_name)
            .cloned()
    }

    /// Tools grouped by provider, providers in the order they registered
    pub fn by_provider(&self) -> Vec<(String, Vec<ToolDescriptor>)> {
        let mut groups: Vec<(String, Vec<ToolDescriptor>)> = Vec::new();
        for tool in self.tools.read().iter() {
            match groups.iter_mut().find(|(id, _)| *id == tool.provider_id) {
                Some((_, group)) => group.push(tool.clone()),
                None => groups.push((tool.provider_id.clone(), vec![tool.clone()])),
            }
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.tools.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.read().is_empty()
    }
}
