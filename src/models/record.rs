use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A flat record returned by the remote API, kept as opaque display data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

const NAME_KEYS: &[&str] = &["name", "title", "username", "software"];

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// First present field among `keys`, rendered as text.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .find_map(|key| self.fields.get(*key))
            .and_then(scalar_text)
    }

    /// Numeric id, also accepted as a numeric string.
    pub fn id(&self) -> Option<i64> {
        match self.fields.get("id")? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn display_name(&self) -> String {
        self.text(NAME_KEYS)
            .or_else(|| self.id().map(|id| format!("#{}", id)))
            .unwrap_or_else(|| "(unnamed)".to_string())
    }

    /// Boolean-ish field: booleans, `0`/`1` and `"0"`/`"1"` are understood.
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.fields.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_i64().map(|n| n != 0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => Some(true),
                "0" | "false" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Remaining scalar fields as `key: value`, for a one-line summary.
    pub fn summary(&self, skip: &[&str], limit: usize) -> String {
        self.fields
            .iter()
            .filter(|(key, _)| key.as_str() != "id" && !skip.contains(&key.as_str()))
            .filter_map(|(key, value)| scalar_text(value).map(|text| format!("{}: {}", key, text)))
            .take(limit)
            .collect::<Vec<_>>()
            .join("  ")
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Pull display records out of whatever list shape the API returned.
///
/// Accepts an array of objects, an object wrapping a single array, or an
/// object keyed by name whose values are objects (the key is kept as `key`).
pub fn records_from_value(value: Value) -> Vec<Record> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(Record::new(map)),
                _ => None,
            })
            .collect(),
        Value::Object(map) => {
            let arrays: Vec<&Value> = map.values().filter(|v| v.is_array()).collect();
            if arrays.len() == 1 {
                return records_from_value(arrays[0].clone());
            }
            map.into_iter()
                .filter_map(|(key, value)| match value {
                    Value::Object(mut fields) => {
                        fields.entry("key").or_insert(Value::String(key));
                        Some(Record::new(fields))
                    }
                    _ => None,
                })
                .collect()
        }
        _ => Vec::new(),
    }
}
