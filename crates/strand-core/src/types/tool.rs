//! Tool descriptor types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared JSON type of a parameter slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotType {
    String,
    Integer,
    Number,
    Boolean,
    /// Anything else (arrays, objects, missing `type`)
    Other,
}

impl SlotType {
    fn from_schema(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("string") | None => SlotType::String,
            Some("integer") => SlotType::Integer,
            Some("number") => SlotType::Number,
            Some("boolean") => SlotType::Boolean,
            Some(_) => SlotType::Other,
        }
    }
}

/// A single named parameter of a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSlot {
    pub name: String,
    pub slot_type: SlotType,
    #[serde(default)]
    pub description: String,
    pub required: bool,
}

impl ParameterSlot {
    pub fn new(name: impl Into<String>, slot_type: SlotType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slot_type,
            description: description.into(),
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Ordered parameter slots of a tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    pub slots: Vec<ParameterSlot>,
}

impl ParameterSchema {
    pub fn new(slots: Vec<ParameterSlot>) -> Self {
        Self { slots }
    }

    /// Build from a JSON Schema object (`properties` + `required`)
    ///
    /// Property order is kept as the provider declared it. Names listed in
    /// `required` without a matching property still become (string) slots so
    /// the fail-closed check sees them.
    pub fn from_json_schema(schema: &Value) -> Self {
        let required: Vec<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut slots: Vec<ParameterSlot> = schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(name, prop)| ParameterSlot {
                        name: name.clone(),
                        slot_type: SlotType::from_schema(prop.get("type")),
                        description: prop
                            .get("description")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                        required: required.contains(&name.as_str()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        for name in &required {
            if !slots.iter().any(|s| s.name == *name) {
                slots.push(ParameterSlot::new(*name, SlotType::String, "").required());
            }
        }

        Self { slots }
    }

    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter(|s| s.required).map(|s| s.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&ParameterSlot> {
        self.slots.iter().find(|s| s.name == name)
    }
}

/// A tool discovered from a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// `provider_id + "." + original_name`
    pub qualified_name: String,
    /// Name the provider knows the tool by
    pub original_name: String,
    pub provider_id: String,
    pub description: String,
    pub parameter_schema: ParameterSchema,
    /// Inherited from the provider config: this provider serves live data
    #[serde(default)]
    pub live: bool,
}

impl ToolDescriptor {
    pub fn new(
        provider_id: impl Into<String>,
        original_name: impl Into<String>,
        description: impl Into<String>,
        parameter_schema: ParameterSchema,
    ) -> Self {
        let provider_id = provider_id.into();
        let original_name = original_name.into();
        Self {
            qualified_name: qualify(&provider_id, &original_name),
            original_name,
            provider_id,
            description: description.into(),
            parameter_schema,
            live: false,
        }
    }

    pub fn with_live(mut self, live: bool) -> Self {
        self.live = live;
        self
    }
}

/// Registry key for a provider's tool
pub fn qualify(provider_id: &str, tool_name: &str) -> String {
    format!("{}.{}", provider_id, tool_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_keeps_declared_order() {
        let schema = ParameterSchema::from_json_schema(&json!({
            "type": "object",
            "properties": {
                "from_station": { "type": "string", "description": "Departure station" },
                "to_station": { "type": "string", "description": "Arrival station" },
                "date": { "type": "string", "description": "Travel date in YYYY-MM-DD format" },
                "time": { "type": "string" }
            },
            "required": ["from_station", "to_station", "date"]
        }));

        let names: Vec<_> = schema.slots.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["from_station", "to_station", "date", "time"]);
        assert_eq!(
            schema.required_names().collect::<Vec<_>>(),
            vec!["from_station", "to_station", "date"]
        );
        assert!(!schema.get("time").unwrap().required);
    }

    #[test]
    fn test_schema_types_and_orphan_required() {
        let schema = ParameterSchema::from_json_schema(&json!({
            "properties": { "guests": { "type": "integer" } },
            "required": ["location"]
        }));
        assert_eq!(schema.get("guests").unwrap().slot_type, SlotType::Integer);
        let location = schema.get("location").unwrap();
        assert!(location.required);
        assert_eq!(location.slot_type, SlotType::String);
    }

    #[test]
    fn test_qualified_name() {
        let tool = ToolDescriptor::new("greeter", "greet", "Greets a person", ParameterSchema::default());
        assert_eq!(tool.qualified_name, "greeter.greet");
        assert!(!tool.live);
    }
}
