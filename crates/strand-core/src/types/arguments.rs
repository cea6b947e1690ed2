//! Typed call arguments produced by the extractor

use chrono::{NaiveDate, NaiveTime};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// A resolved slot value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
    Time(NaiveTime),
}

impl ArgValue {
    pub fn text(value: impl Into<String>) -> Self {
        ArgValue::Text(value.into())
    }

    /// Wire form sent to providers
    pub fn to_json(&self) -> Value {
        match self {
            ArgValue::Text(s) => Value::String(s.clone()),
            ArgValue::Integer(n) => Value::from(*n),
            ArgValue::Date(_) | ArgValue::Time(_) => Value::String(self.to_string()),
        }
    }
}

impl std::fmt::Display for ArgValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgValue::Text(s) => write!(f, "{}", s),
            ArgValue::Integer(n) => write!(f, "{}", n),
            ArgValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            ArgValue::Time(t) => write!(f, "{}", t.format("%H:%M")),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Text(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Text(s)
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        ArgValue::Integer(n)
    }
}

impl From<NaiveDate> for ArgValue {
    fn from(d: NaiveDate) -> Self {
        ArgValue::Date(d)
    }
}

impl From<NaiveTime> for ArgValue {
    fn from(t: NaiveTime) -> Self {
        ArgValue::Time(t)
    }
}

impl Serialize for ArgValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ArgValue::Integer(n) => serializer.serialize_i64(*n),
            other => serializer.collect_str(other),
        }
    }
}

/// Slot name to value, in the order slots were resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedArguments {
    entries: Vec<(String, ArgValue)>,
}

impl ExtractedArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a slot value
    pub fn insert(&mut self, slot: impl Into<String>, value: impl Into<ArgValue>) {
        let slot = slot.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == slot) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((slot, value)),
        }
    }

    pub fn with(mut self, slot: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.insert(slot, value);
        self
    }

    pub fn get(&self, slot: &str) -> Option<&ArgValue> {
        self.entries.iter().find(|(name, _)| name == slot).map(|(_, v)| v)
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.get(slot).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// `arguments` object for a `tools/call` request
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl Serialize for ExtractedArguments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl std::fmt::Display for ExtractedArguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
