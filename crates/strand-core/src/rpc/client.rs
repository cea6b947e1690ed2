//! JSON-RPC client for stdio tool providers
//!
//! Every request spawns the provider process, writes one JSON object followed
//! by a newline to its stdin, closes stdin and reads exactly one response line
//! from stdout. Nothing is kept alive between requests, so a provider that
//! crashes or hangs only affects the exchange in flight.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use super::wire::{InitializeResult, ToolCallResult, ToolList, WireTool};
use crate::config::ProviderConfig;
use crate::logging::file_logger;

const PROTOCOL_VERSION: &str = "2024-11-05";

/// Errors that can occur during an exchange with a provider
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("Failed to launch provider: {0}")]
    Spawn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("RPC error {code}: {message}")]
    RpcError { code: i64, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider exited with {status}: {stderr}")]
    ExitStatus { status: String, stderr: String },

    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

pub type RpcResult<T> = Result<T, RpcError>;

/// How to start a provider process
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    pub command: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

impl From<&ProviderConfig> for LaunchSpec {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            cwd: config.cwd.clone(),
            env: config.env.clone(),
        }
    }
}

/// Line-delimited JSON-RPC client over a freshly spawned process per request
pub struct StdioRpcClient {
    launch: LaunchSpec,
    timeout: Duration,
    request_id: AtomicU64,
}

impl StdioRpcClient {
    pub fn new(launch: LaunchSpec, timeout: Duration) -> Self {
        Self {
            launch,
            timeout,
            request_id: AtomicU64::new(1),
        }
    }

    /// Make a JSON-RPC request
    pub async fn call<P: Serialize, R: DeserializeOwned>(&self, method: &str, params: P) -> RpcResult<R> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": serde_json::to_value(params)?,
        });

        let response = self.send_request(&request).await?;
        self.parse_response(response)
    }

    async fn send_request(&self, request: &Value) -> RpcResult<Value> {
        let method = request.get("method").and_then(Value::as_str).unwrap_or("unknown");
        let mut line = serde_json::to_string(request)?;
        line.push('\n');

        file_logger::debug(
            "rpc::client",
            &format!("Spawning {} for method={}", self.launch.command, method),
        );

        let mut command = Command::new(&self.launch.command);
        command
            .args(&self.launch.args)
            .envs(&self.launch.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &self.launch.cwd {
            command.current_dir(cwd);
        }

        let mut child = command.spawn().map_err(|e| {
            file_logger::error("rpc::client", &format!("Spawn failed: {}", e));
            RpcError::Spawn(format!("{}: {}", self.launch.command, e))
        })?;

        // The child moves into the exchange; if the timeout fires the future
        // is dropped and kill_on_drop reaps the process.
        let exchange = async move {
            if let Some(mut stdin) = child.stdin.take() {
                match stdin.write_all(line.as_bytes()).await {
                    Ok(()) => stdin.flush().await?,
                    // The provider may answer and exit without draining stdin
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                        file_logger::debug("rpc::client", "Provider closed stdin early");
                    }
                    Err(e) => return Err(RpcError::Io(e)),
                }
            }
            Ok::<_, RpcError>(child.wait_with_output().await?)
        };

        let output = match timeout(self.timeout, exchange).await {
            Ok(result) => result?,
            Err(_) => {
                file_logger::warn(
                    "rpc::client",
                    &format!("method={} timed out after {:?}", method, self.timeout),
                );
                return Err(RpcError::Timeout(self.timeout));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            file_logger::error(
                "rpc::client",
                &format!("method={} exited with {}: {}", method, output.status, stderr),
            );
            return Err(RpcError::ExitStatus {
                status: output.status.to_string(),
                stderr,
            });
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| RpcError::InvalidResponse("Output is not valid UTF-8".to_string()))?;
        let response = Self::read_response(&stdout)?;
        file_logger::debug("rpc::client", &format!("method={} answered", method));
        Ok(response)
    }

    /// Decode the single response line
    fn read_response(stdout: &str) -> RpcResult<Value> {
        let lines: Vec<&str> = stdout.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        match lines.as_slice() {
            [] => Err(RpcError::InvalidResponse("Empty output".to_string())),
            [line] => Ok(serde_json::from_str(line)?),
            more => Err(RpcError::InvalidResponse(format!(
                "Expected one response line, got {}",
                more.len()
            ))),
        }
    }

    fn parse_response<R: DeserializeOwned>(&self, response: Value) -> RpcResult<R> {
        if let Some(error) = response.get("error") {
            let code = error.get("code").and_then(Value::as_i64).unwrap_or(-1);
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string();
            return Err(RpcError::RpcError { code, message });
        }

        let result = response
            .get("result")
            .ok_or_else(|| RpcError::InvalidResponse("Missing result field".to_string()))?;

        serde_json::from_value(result.clone()).map_err(|e| e.into())
    }

    // ==================== PROVIDER METHODS ====================

    /// Liveness handshake
    pub async fn initialize(&self) -> RpcResult<InitializeResult> {
        self.call(
            "initialize",
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": {
                    "name": "strand-core",
                    "version": env!("CARGO_PKG_VERSION"),
                },
            }),
        )
        .await
    }

    /// List the provider's tools (`tools/list`)
    pub async fn list_tools(&self) -> RpcResult<Vec<WireTool>> {
        let result: ToolList = self.call("tools/list", json!({})).await?;
        Ok(result.tools)
    }

    /// Call a tool (`tools/call`)
    pub async fn call_tool(&self, name: &str, arguments: Value) -> RpcResult<ToolCallResult> {
        #[derive(Serialize)]
        struct Params<'a> {
            name: &'a str,
            arguments: Value,
        }

        self.call("tools/call", Params { name, arguments }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_response_requires_single_line() {
        assert!(StdioRpcClient::read_response("{\"result\":{}}\n").is_ok());
        assert!(matches!(
            StdioRpcClient::read_response("\n  \n"),
            Err(RpcError::InvalidResponse(_))
        ));
        assert!(matches!(
            StdioRpcClient::read_response("{}\n{}\n"),
            Err(RpcError::InvalidResponse(_))
        ));
        assert!(matches!(
            StdioRpcClient::read_response("Traceback (most recent call last)"),
            Err(RpcError::Json(_))
        ));
    }

    #[cfg(unix)]
    fn shell(script: &str, timeout: Duration) -> StdioRpcClient {
        StdioRpcClient::new(
            LaunchSpec {
                command: "sh".to_string(),
                args: vec!["-c".to_string(), script.to_string()],
                cwd: None,
                env: BTreeMap::new(),
            },
            timeout,
        )
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_call_tool_roundtrip() {
        let client = shell(
            r#"read line; echo '{"jsonrpc":"2.0","id":1,"result":{"content":[{"type":"text","text":"Hello, Alice!"}]}}'"#,
            Duration::from_secs(5),
        );
        let result = client.call_tool("greet", json!({ "name": "Alice" })).await.unwrap();
        assert_eq!(result.text(), "Hello, Alice!");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_request_line_is_newline_terminated_json() {
        // Echo the request back as the result so the test can inspect it
        let client = shell(
            r#"read line; printf '{"jsonrpc":"2.0","id":1,"result":%s}\n' "$line""#,
            Duration::from_secs(5),
        );
        let echoed: Value = client.call("tools/list", json!({})).await.unwrap();
        assert_eq!(echoed["jsonrpc"], "2.0");
        assert_eq!(echoed["method"], "tools/list");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_rpc_error_object() {
        let client = shell(
            r#"read line; echo '{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"Tool not found: nope"}}'"#,
            Duration::from_secs(5),
        );
        let err = client.call_tool("nope", json!({})).await.unwrap_err();
        match err {
            RpcError::RpcError { code, message } => {
                assert_eq!(code, -32601);
                assert_eq!(message, "Tool not found: nope");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit() {
        let client = shell("read line; echo boom >&2; exit 3", Duration::from_secs(5));
        let err = client.list_tools().await.unwrap_err();
        assert!(matches!(err, RpcError::ExitStatus { ref stderr, .. } if stderr == "boom"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_hung_provider_times_out() {
        let client = shell("sleep 5", Duration::from_millis(200));
        let started = std::time::Instant::now();
        let err = client.initialize().await.unwrap_err();
        assert!(matches!(err, RpcError::Timeout(_)));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_executable() {
        let client = StdioRpcClient::new(
            LaunchSpec {
                command: "/definitely/not/a/provider".to_string(),
                args: vec![],
                cwd: None,
                env: BTreeMap::new(),
            },
            Duration::from_secs(1),
        );
        assert!(matches!(client.initialize().await, Err(RpcError::Spawn(_))));
    }
}
