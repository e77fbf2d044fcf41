use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use super::path::ConfigPath;

/// Editable widget chosen for one configuration value.
///
/// The variant is decided once when a tree is loaded or edited, not on
/// every draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Toggle(bool),
    Number(f64),
    /// Hex colour string paired with a swatch.
    Color(String),
    Text(String),
    /// Numeric badges; entries that are not numbers are not shown.
    NumberList(Vec<f64>),
    Group(Vec<Field>),
    Unsupported(&'static str),
}

/// A labelled control at a known path.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub path: ConfigPath,
    pub control: Control,
}

fn hex_color() -> &'static Regex {
    static HEX_COLOR: OnceLock<Regex> = OnceLock::new();
    HEX_COLOR.get_or_init(|| Regex::new(r"^[0-9A-Fa-f]{6,8}$").expect("valid colour pattern"))
}

/// A string gets a colour control iff its key contains `color`
/// (case-sensitive) and the value is 6 to 8 hex digits.
pub fn is_color_field(key: &str, value: &str) -> bool {
    key.contains("color") && hex_color().is_match(value)
}

/// Numeric view of an array: numbers kept, numeric strings parsed,
/// everything else dropped.
pub fn numeric_entries(items: &[Value]) -> Vec<f64> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|n| n.is_finite())
        .collect()
}

/// Pick the control for `value`, recursing into objects.
///
/// Checked in order: boolean, number, string, array, object, anything else.
pub fn classify(key: &str, path: &ConfigPath, value: &Value) -> Control {
    match value {
        Value::Bool(b) => Control::Toggle(*b),
        Value::Number(n) => Control::Number(n.as_f64().unwrap_or(0.0)),
        Value::String(s) if is_color_field(key, s) => Control::Color(s.clone()),
        Value::String(s) => Control::Text(s.clone()),
        Value::Array(items) => Control::NumberList(numeric_entries(items)),
        Value::Object(map) => Control::Group(
            map.iter()
                .map(|(child_key, child)| {
                    let child_path = path.child(child_key);
                    Field {
                        key: child_key.clone(),
                        control: classify(child_key, &child_path, child),
                        path: child_path,
                    }
                })
                .collect(),
        ),
        Value::Null => Control::Unsupported("null"),
    }
}

/// Build the control tree for a whole configuration document.
pub fn build(root: &Value) -> Control {
    classify("", &ConfigPath::root(), root)
}

/// One line of the flattened form, in display order.
#[derive(Debug, Clone, Copy)]
pub struct FormRow<'a> {
    pub depth: usize,
    pub field: &'a Field,
}

/// Flatten nested groups depth-first; a group row precedes its children.
pub fn flatten(control: &Control) -> Vec<FormRow<'_>> {
    fn walk<'a>(fields: &'a [Field], depth: usize, rows: &mut Vec<FormRow<'a>>) {
        for field in fields {
            rows.push(FormRow { depth, field });
            if let Control::Group(children) = &field.control {
                walk(children, depth + 1, rows);
            }
        }
    }

    let mut rows = Vec::new();
    if let Control::Group(fields) = control {
        walk(fields, 0, &mut rows);
    }
    rows
}

impl Control {
    pub fn is_editable(&self) -> bool {
        !matches!(self, Control::Group(_) | Control::Unsupported(_))
    }

    /// Current value as it appears in an input box.
    pub fn display_value(&self) -> String {
        match self {
            Control::Toggle(b) => b.to_string(),
            Control::Number(n) => format_number(*n),
            Control::Color(s) | Control::Text(s) => s.clone(),
            Control::NumberList(values) => values
                .iter()
                .map(|n| format_number(*n))
                .collect::<Vec<_>>()
                .join(", "),
            Control::Group(fields) => format!("{} entries", fields.len()),
            Control::Unsupported(kind) => format!("unsupported type ({kind})"),
        }
    }
}

pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// RGB components of a hex colour value, ignoring any alpha byte.
pub fn color_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    if !hex_color().is_match(hex) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_color_detection() {
        assert!(is_color_field("outline_color", "FF00AA"));
        assert!(is_color_field("outline_color", "ff00aa80"));
        assert!(!is_color_field("outline_color", "notahex"));
        assert!(!is_color_field("outline_color", "#FF00AA"));
        assert!(!is_color_field("Outline_Color", "FF00AA"));
        assert!(!is_color_field("outline", "FF00AA"));
    }

    #[test]
    fn test_dispatch_order() {
        let root = json!({
            "enabled": true,
            "fov": 90.5,
            "box_color": "00FF00",
            "name": "hello",
            "keys": [1, "2", "x", null],
            "empty": [],
            "nested": {"depth": 1},
            "missing": null
        });
        let Control::Group(fields) = build(&root) else {
            panic!("root should be a group");
        };
        let controls: Vec<(&str, &Control)> =
            fields.iter().map(|f| (f.key.as_str(), &f.control)).collect();

        assert_eq!(controls[0], ("enabled", &Control::Toggle(true)));
        assert_eq!(controls[1], ("fov", &Control::Number(90.5)));
        assert_eq!(controls[2], ("box_color", &Control::Color("00FF00".into())));
        assert_eq!(controls[3], ("name", &Control::Text("hello".into())));
        assert_eq!(controls[4], ("keys", &Control::NumberList(vec![1.0, 2.0])));
        assert_eq!(controls[5], ("empty", &Control::NumberList(vec![])));
        assert_eq!(controls[7], ("missing", &Control::Unsupported("null")));

        let Control::Group(nested) = controls[6].1 else {
            panic!("nested should be a group");
        };
        assert_eq!(nested[0].path, ConfigPath::from_keys(["nested", "depth"]));
    }

    #[test]
    fn test_flatten_order_and_depth() {
        let root = json!({"a": {"b": true, "c": {"d": 1}}, "e": "x"});
        let control = build(&root);
        let rows: Vec<(usize, String)> = flatten(&control)
            .iter()
            .map(|row| (row.depth, row.field.path.to_string()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (0, "a".to_string()),
                (1, "a.b".to_string()),
                (1, "a.c".to_string()),
                (2, "a.c.d".to_string()),
                (0, "e".to_string()),
            ]
        );
    }

    #[test]
    fn test_scalar_root_has_no_rows() {
        assert!(flatten(&build(&json!(3))).is_empty());
    }

    #[test]
    fn test_color_rgb() {
        assert_eq!(color_rgb("FF8000"), Some((255, 128, 0)));
        assert_eq!(color_rgb("FF800080"), Some((255, 128, 0)));
        assert_eq!(color_rgb("zz"), None);
    }
}
