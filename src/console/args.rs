use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

use crate::api::ApiRequest;

use super::registry::{Method, ParamKind, BEAUTIFY};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgError {
    #[error("Missing required parameter --{param} for command {method}")]
    MissingRequired { method: String, param: String },

    #[error("Parameter --{0} expects an integer.")]
    NotAnInteger(String),

    #[error("Parameter --{0} expects a list (e.g., [1,2,3]).")]
    NotAList(String),

    #[error("Unterminated quote in input")]
    UnterminatedQuote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// `--name` with no value.
    Flag,
    Value(String),
}

impl ArgValue {
    fn text(&self) -> &str {
        match self {
            ArgValue::Flag => "true",
            ArgValue::Value(v) => v,
        }
    }
}

/// Split a command line on whitespace, keeping double-quoted runs together.
pub fn tokenize(line: &str) -> Result<Vec<String>, ArgError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        return Err(ArgError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// `--name value` pairs; `--name` followed by another `--flag` or the end
/// of input is a flag. Bare words are ignored.
pub fn parse_arguments<S: AsRef<str>>(args: &[S]) -> HashMap<String, ArgValue> {
    let mut parsed = HashMap::new();
    let mut i = 0;
    while i < args.len() {
        if let Some(name) = args[i].as_ref().strip_prefix("--") {
            match args.get(i + 1).map(AsRef::as_ref) {
                Some(next) if !next.starts_with("--") => {
                    parsed.insert(name.to_string(), ArgValue::Value(next.to_string()));
                    i += 1;
                }
                _ => {
                    parsed.insert(name.to_string(), ArgValue::Flag);
                }
            }
        }
        i += 1;
    }
    parsed
}

fn parse_bool(text: &str) -> bool {
    matches!(text.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

/// Validate parsed arguments against a method and build the request.
pub fn build_request(
    method: &Method,
    args: &HashMap<String, ArgValue>,
) -> Result<ApiRequest, ArgError> {
    let mut request = ApiRequest::new(method.name);

    for param in method.params {
        let Some(value) = args.get(param.name) else {
            if param.required {
                return Err(ArgError::MissingRequired {
                    method: method.name.to_string(),
                    param: param.name.to_string(),
                });
            }
            continue;
        };

        let values: Vec<String> = match param.kind {
            ParamKind::String => vec![value.text().to_string()],
            ParamKind::Int => {
                let n: i64 = value
                    .text()
                    .trim()
                    .parse()
                    .map_err(|_| ArgError::NotAnInteger(param.name.to_string()))?;
                vec![n.to_string()]
            }
            ParamKind::Bool => vec![parse_bool(value.text()).to_string()],
            ParamKind::List => parse_list(value.text())
                .ok_or_else(|| ArgError::NotAList(param.name.to_string()))?,
        };

        for v in values {
            request = if param.post {
                request.post(param.name, v)
            } else {
                request.param(param.name, v)
            };
        }
    }

    if args.get(BEAUTIFY.name) == Some(&ArgValue::Flag) {
        request = request.beautify();
    }

    Ok(request)
}

/// A JSON list literal; each element becomes one repeated parameter.
fn parse_list(text: &str) -> Option<Vec<String>> {
    match serde_json::from_str::<Value>(text.trim()).ok()? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
        ),
        _ => None,
    }
}
