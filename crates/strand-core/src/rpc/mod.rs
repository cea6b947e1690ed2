//! Line-delimited JSON-RPC transport for tool providers

mod client;
pub mod wire;

pub use client::{LaunchSpec, RpcError, RpcResult, StdioRpcClient};
pub use wire::{InitializeResult, ToolCallResult, ToolContent, WireTool};
