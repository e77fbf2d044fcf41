use serde_json::Value;

/// Strings longer than this are cut and suffixed with `...`.
pub const MAX_STRING_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Branch,
    Null,
    Bool,
    Number,
    Text,
    /// A string that reads like an error message.
    Alert,
    Empty,
}

/// One rendered line of a JSON tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub depth: usize,
    pub text: String,
    pub kind: LineKind,
}

impl TreeLine {
    /// Indented plain-text form.
    pub fn render(&self) -> String {
        format!("{}{}", "  ".repeat(self.depth), self.text)
    }
}

/// Flatten a JSON value into an indented tree: object entries become
/// `key:` branches, array items `[i]` branches, scalars stay inline.
pub fn json_tree(value: &Value) -> Vec<TreeLine> {
    let mut lines = Vec::new();
    match value {
        Value::Object(_) | Value::Array(_) if !is_empty_container(value) => {
            walk(value, 0, &mut lines)
        }
        scalar => {
            let (text, kind) = scalar_text(scalar);
            lines.push(TreeLine { depth: 0, text, kind });
        }
    }
    lines
}

fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn is_branch(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_)) && !is_empty_container(value)
}

fn walk(value: &Value, depth: usize, lines: &mut Vec<TreeLine>) {
    let entries: Vec<(String, &Value)> = match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("[{}]", i), v))
            .collect(),
        _ => return,
    };
    let is_array = value.is_array();

    for (label, child) in entries {
        if is_branch(child) {
            let text = if is_array { label } else { format!("{}:", label) };
            lines.push(TreeLine {
                depth,
                text,
                kind: LineKind::Branch,
            });
            walk(child, depth + 1, lines);
        } else {
            let (scalar, kind) = scalar_text(child);
            let separator = if is_array { " " } else { ": " };
            lines.push(TreeLine {
                depth,
                text: format!("{}{}{}", label, separator, scalar),
                kind,
            });
        }
    }
}

fn scalar_text(value: &Value) -> (String, LineKind) {
    match value {
        Value::Null => ("null".to_string(), LineKind::Null),
        Value::Bool(b) => (b.to_string(), LineKind::Bool),
        Value::Number(n) => (n.to_string(), LineKind::Number),
        Value::String(s) => {
            let lower = s.to_lowercase();
            let kind = if lower.contains("error") || lower.contains("invalid") {
                LineKind::Alert
            } else {
                LineKind::Text
            };
            (Value::String(truncate(s)).to_string(), kind)
        }
        empty => (empty.to_string(), LineKind::Empty),
    }
}

pub fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_STRING_CHARS {
        let head: String = text.chars().take(MAX_STRING_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
