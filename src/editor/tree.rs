use serde_json::{Number, Value};
use thiserror::Error;

use super::control::{self, Control};
use super::path::ConfigPath;

#[derive(Error, Debug)]
pub enum EditError {
    #[error("No value at {0}")]
    MissingPath(ConfigPath),

    #[error("{path} holds {found}, expected {expected}")]
    TypeMismatch {
        path: ConfigPath,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Badge {index} out of range at {path}")]
    BadgeOutOfRange { path: ConfigPath, index: usize },

    #[error("Configuration is not valid JSON; edit it as raw text")]
    NotParsed,

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A change requested by one control.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    SetBool(bool),
    /// Parsed as a float; unparseable input stores 0.
    SetNumber(String),
    SetText(String),
    /// Appends a parsed number; unparseable input changes nothing.
    AddNumber(String),
    RemoveNumber(usize),
}

/// A parsed configuration document and its pretty-printed text.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigTree {
    root: Value,
    raw: String,
    form: Control,
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Lenient float parse used by number inputs.
pub fn parse_number(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Whole numbers are stored as integers so `5` does not become `5.0`.
pub fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::from(0))
    }
}

impl ConfigTree {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let root: Value = serde_json::from_str(text)?;
        Self::from_value(root)
    }

    pub fn from_value(root: Value) -> Result<Self, serde_json::Error> {
        let raw = serde_json::to_string_pretty(&root)?;
        let form = control::build(&root);
        Ok(Self { root, raw, form })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Pretty-printed JSON mirror of the tree.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn form(&self) -> &Control {
        &self.form
    }

    #[cfg(test)]
    pub fn get(&self, path: &ConfigPath) -> Option<&Value> {
        self.root.pointer(&path.to_pointer())
    }

    /// Apply one edit to a deep copy of the tree and return the copy.
    ///
    /// Only the value at `path` changes; `self` is left as it was.
    pub fn apply(&self, path: &ConfigPath, edit: Edit) -> Result<Self, EditError> {
        let mut root = self.root.clone();
        let slot = root
            .pointer_mut(&path.to_pointer())
            .ok_or_else(|| EditError::MissingPath(path.clone()))?;

        apply_edit(slot, path, edit)?;
        Ok(Self::from_value(root)?)
    }
}

fn mismatch(path: &ConfigPath, expected: &'static str, found: &Value) -> EditError {
    EditError::TypeMismatch {
        path: path.clone(),
        expected,
        found: type_name(found),
    }
}

fn apply_edit(slot: &mut Value, path: &ConfigPath, edit: Edit) -> Result<(), EditError> {
    match edit {
        Edit::SetBool(b) => match slot {
            Value::Bool(current) => *current = b,
            other => return Err(mismatch(path, "a boolean", other)),
        },
        Edit::SetNumber(text) => match slot {
            Value::Number(_) => *slot = number_value(parse_number(&text)),
            other => return Err(mismatch(path, "a number", other)),
        },
        Edit::SetText(text) => match slot {
            Value::String(current) => *current = text,
            other => return Err(mismatch(path, "a string", other)),
        },
        Edit::AddNumber(text) => {
            let mut numbers = current_numbers(slot, path)?;
            if let Some(n) = text.trim().parse::<f64>().ok().filter(|n| n.is_finite()) {
                numbers.push(n);
            }
            *slot = numbers_value(numbers);
        }
        Edit::RemoveNumber(index) => {
            let mut numbers = current_numbers(slot, path)?;
            if index >= numbers.len() {
                return Err(EditError::BadgeOutOfRange {
                    path: path.clone(),
                    index,
                });
            }
            numbers.remove(index);
            *slot = numbers_value(numbers);
        }
    }
    Ok(())
}

fn current_numbers(slot: &Value, path: &ConfigPath) -> Result<Vec<f64>, EditError> {
    match slot {
        Value::Array(items) => Ok(control::numeric_entries(items)),
        other => Err(mismatch(path, "an array", other)),
    }
}

fn numbers_value(numbers: Vec<f64>) -> Value {
    Value::Array(numbers.into_iter().map(number_value).collect())
}
