//! Provider adapter over the stdio JSON-RPC transport

use async_trait::async_trait;

use super::error::{AdapterError, AdapterResult};
use super::traits::{CallOutcome, ProviderAdapter};
use crate::config::{ProviderConfig, Settings};
use crate::logging::SharedLogger;
use crate::rpc::{LaunchSpec, RpcError, StdioRpcClient};
use crate::types::{ExtractedArguments, ToolDescriptor};
use crate::{log_debug, log_info, log_warn};

/// Adapter for a provider launched as a child process per exchange
pub struct StdioAdapter {
    id: String,
    live: bool,
    client: StdioRpcClient,
    logger: SharedLogger,
}

impl StdioAdapter {
    pub fn new(config: &ProviderConfig, settings: &Settings, logger: SharedLogger) -> Self {
        Self {
            id: config.id.clone(),
            live: config.live,
            client: StdioRpcClient::new(LaunchSpec::from(config), config.timeout(settings)),
            logger,
        }
    }
}

#[async_trait]
impl ProviderAdapter for StdioAdapter {
    fn provider_id(&self) -> &str {
        &self.id
    }

    async fn discover(&self) -> AdapterResult<Vec<ToolDescriptor>> {
        let init = self
            .client
            .initialize()
            .await
            .map_err(|e| AdapterError::discovery(&self.id, e))?;
        if let Some(info) = init.server_info {
            log_debug!(self.logger, "[{}] Server: {} {}", self.id, info.name, info.version.unwrap_or_default());
        }

        let tools = self
            .client
            .list_tools()
            .await
            .map_err(|e| AdapterError::discovery(&self.id, e))?;

        let descriptors: Vec<ToolDescriptor> = tools
            .into_iter()
            .map(|t| t.into_descriptor(&self.id).with_live(self.live))
            .collect();

        log_info!(self.logger, "[{}] Discovered {} tools", self.id, descriptors.len());
        Ok(descriptors)
    }

    async fn call(&self, tool: &str, arguments: &ExtractedArguments) -> AdapterResult<CallOutcome> {
        log_debug!(self.logger, "[{}] Calling {} with {}", self.id, tool, arguments);

        match self.client.call_tool(tool, arguments.to_json()).await {
            Ok(result) if result.is_error => Ok(CallOutcome::Rejected {
                code: None,
                message: result.text(),
            }),
            Ok(result) => Ok(CallOutcome::Text(result.text())),
            Err(RpcError::RpcError { code, message }) => {
                log_warn!(self.logger, "[{}] {} rejected ({}): {}", self.id, tool, code, message);
                Ok(CallOutcome::Rejected {
                    code: Some(code),
                    message,
                })
            }
            Err(e) => {
                log_warn!(self.logger, "[{}] {} failed: {}", self.id, tool, e);
                Err(AdapterError::transport(&self.id, e))
            }
        }
    }
}
