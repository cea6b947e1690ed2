//! Wire shapes of the provider protocol (`initialize`, `tools/list`, `tools/call`)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{ParameterSchema, ToolDescriptor};

/// `initialize` result, only used to confirm the provider is alive
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitializeResult {
    #[serde(default, rename = "protocolVersion")]
    pub protocol_version: Option<String>,
    #[serde(default)]
    pub capabilities: Value,
    #[serde(default, rename = "serverInfo")]
    pub server_info: Option<ServerInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// Function body of an OpenAI-style tool entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Value,
}

/// One entry of a `tools/list` result
///
/// Providers either wrap each tool as `{"type": "function", "function": {...}}`
/// or use the flat MCP shape with `inputSchema`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireTool {
    Function {
        function: FunctionSpec,
    },
    Flat {
        name: String,
        #[serde(default)]
        description: String,
        #[serde(default, rename = "inputSchema")]
        input_schema: Value,
    },
}

impl WireTool {
    pub fn name(&self) -> &str {
        match self {
            WireTool::Function { function } => &function.name,
            WireTool::Flat { name, .. } => name,
        }
    }

    /// Convert into a registry descriptor owned by `provider_id`
    pub fn into_descriptor(self, provider_id: &str) -> ToolDescriptor {
        let (name, description, schema) = match self {
            WireTool::Function { function } => (function.name, function.description, function.parameters),
            WireTool::Flat { name, description, input_schema } => (name, description, input_schema),
        };
        ToolDescriptor::new(
            provider_id,
            name,
            description,
            ParameterSchema::from_json_schema(&schema),
        )
    }
}

/// `tools/list` result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolList {
    pub tools: Vec<WireTool>,
}

/// Content part of a `tools/call` result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
    /// Images, resources and anything else a provider may attach
    #[serde(other)]
    Unsupported,
}

/// `tools/call` result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallResult {
    #[serde(default)]
    pub content: Vec<ToolContent>,
    #[serde(default, rename = "isError")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Text parts joined by newlines
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                ToolContent::Text { text } => Some(text.as_str()),
                ToolContent::Unsupported => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_function_shape() {
        let list: ToolList = serde_json::from_value(json!({
            "tools": [{
                "type": "function",
                "function": {
                    "name": "greet",
                    "description": "Greets a person by their name.",
                    "parameters": {
                        "type": "object",
                        "properties": { "name": { "type": "string", "description": "The name of the person to greet" } },
                        "required": ["name"]
                    }
                }
            }]
        }))
        .unwrap();

        let tool = list.tools.into_iter().next().unwrap().into_descriptor("greeter");
        assert_eq!(tool.qualified_name, "greeter.greet");
        assert_eq!(tool.description, "Greets a person by their name.");
        assert!(tool.parameter_schema.get("name").unwrap().required);
    }

    #[test]
    fn test_flat_shape() {
        let tool: WireTool = serde_json::from_value(json!({
            "name": "get_time",
            "description": "Gets the current date and time.",
            "inputSchema": { "type": "object", "properties": {} }
        }))
        .unwrap();
        assert_eq!(tool.name(), "get_time");
        assert!(tool.into_descriptor("greeter").parameter_schema.slots.is_empty());
    }

    #[test]
    fn test_call_result_text() {
        let result: ToolCallResult = serde_json::from_value(json!({
            "content": [
                { "type": "text", "text": "Hello, Alice!" },
                { "type": "image", "data": "..." },
                { "type": "text", "text": "Have a nice day" }
            ]
        }))
        .unwrap();
        assert!(!result.is_error);
        assert_eq!(result.text(), "Hello, Alice!\nHave a nice day");
    }
}
