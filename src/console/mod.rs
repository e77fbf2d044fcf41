//! Interactive console for calling any remote API method by name.

pub mod args;
pub mod format;
pub mod registry;

use crate::api::{ApiRequest, ApiResponse};

pub use format::{json_tree, LineKind};

/// Output lines kept in the scrollback.
const MAX_LINES: usize = 2000;

/// What a submitted line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Lines(Vec<String>),
    Call(ApiRequest),
    Clear,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStyle {
    Prompt,
    Info,
    Error,
    Json(LineKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub text: String,
    pub style: ConsoleStyle,
}

fn category_lines() -> Vec<String> {
    std::iter::once("Available categories:".to_string())
        .chain(registry::CATEGORIES.iter().map(|c| format!("  - {}", c)))
        .collect()
}

fn help(topic: Option<&str>) -> Vec<String> {
    let Some(topic) = topic else {
        let mut lines = category_lines();
        lines.extend([
            String::new(),
            "Type 'help <command>' for more details on a command.".to_string(),
            "Type 'help <category>' to list commands in a category.".to_string(),
            "Type 'list categories' to see all categories.".to_string(),
            "Type 'search <keyword>' to find commands.".to_string(),
            "Type 'clear' to clear the output.".to_string(),
        ]);
        return lines;
    };

    if let Some(method) = registry::find(topic) {
        let mut lines = vec![
            format!("Command: {}", method.name),
            format!("  Description: {}", method.description),
            format!("  Category: {}", method.category),
            "  Parameters:".to_string(),
        ];
        for param in method.all_params() {
            let required = if param.required { " (Required)" } else { "" };
            let post = if param.post { " (POST data)" } else { "" };
            lines.push(format!("    --{} ({}){}{}", param.name, param.kind, required, post));
        }
        lines.push(format!("  Example: {}", method.example));
        return lines;
    }

    if let Some(category) = registry::find_category(topic) {
        return std::iter::once(format!("Commands in category '{}':", category))
            .chain(
                registry::methods_in(category)
                    .map(|m| format!("  {}: {}", m.name, m.description)),
            )
            .collect();
    }

    vec![format!("Unknown command or category: {}", topic)]
}

fn search(keyword: Option<&str>) -> Vec<String> {
    let Some(keyword) = keyword else {
        return vec!["Usage: search <keyword>".to_string()];
    };
    let keyword = keyword.to_lowercase();
    let (methods, categories) = registry::search(&keyword);

    let mut lines = Vec::new();
    if !methods.is_empty() {
        lines.push(format!("Commands matching '{}':", keyword));
        lines.extend(methods.iter().map(|m| format!("  {}: {}", m.name, m.description)));
    }
    if !categories.is_empty() {
        lines.push(format!("Categories matching '{}':", keyword));
        lines.extend(categories.iter().map(|c| format!("  - {}", c)));
    }
    if lines.is_empty() {
        lines.push(format!("No commands or categories found matching '{}'.", keyword));
    }
    lines
}

/// Interpret one submitted line.
pub fn interpret(line: &str) -> Reply {
    let tokens = match args::tokenize(line) {
        Ok(tokens) => tokens,
        Err(e) => return Reply::Lines(vec![format!("Error: {}", e)]),
    };
    let Some((command, rest)) = tokens.split_first() else {
        return Reply::Lines(Vec::new());
    };
    let first = rest.first().map(String::as_str);

    match command.as_str() {
        "exit" | "quit" => Reply::Exit,
        "clear" => Reply::Clear,
        "help" => Reply::Lines(help(first)),
        "list" if first == Some("categories") => Reply::Lines(category_lines()),
        "list" => Reply::Lines(vec!["Usage: list categories".to_string()]),
        "search" => Reply::Lines(search(first)),
        name => match registry::find(name) {
            Some(method) => match args::build_request(method, &args::parse_arguments(rest)) {
                Ok(request) => Reply::Call(request),
                Err(e) => Reply::Lines(vec![format!("Error: {}", e)]),
            },
            None => Reply::Lines(vec![format!(
                "Unknown command: {}. Type 'help' for a list of commands.",
                name
            )]),
        },
    }
}

/// Console screen state: input line, scrollback and command history.
#[derive(Debug, Clone)]
pub struct Console {
    pub input: String,
    lines: Vec<ConsoleLine>,
    history: Vec<String>,
    history_pos: Option<usize>,
    pub scroll: usize,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        let mut console = Self {
            input: String::new(),
            lines: Vec::new(),
            history: Vec::new(),
            history_pos: None,
            scroll: 0,
        };
        console.info("Type 'help' for available commands.");
        console
    }

    pub fn lines(&self) -> &[ConsoleLine] {
        &self.lines
    }

    fn push(&mut self, text: impl Into<String>, style: ConsoleStyle) {
        self.lines.push(ConsoleLine {
            text: text.into(),
            style,
        });
        if self.lines.len() > MAX_LINES {
            let excess = self.lines.len() - MAX_LINES;
            self.lines.drain(..excess);
        }
        self.scroll = 0;
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text, ConsoleStyle::Info);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text, ConsoleStyle::Error);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll = 0;
    }

    /// Method names completing the word being typed.
    pub fn suggestions(&self) -> Vec<&'static str> {
        let text = self.input.trim_start();
        if text.contains(char::is_whitespace) {
            return Vec::new();
        }
        registry::suggestions(text)
    }

    /// Replace the typed word with the first suggestion.
    pub fn complete(&mut self) {
        if let Some(first) = self.suggestions().first() {
            self.input = first.to_string();
        }
    }

    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let pos = match self.history_pos {
            Some(0) => 0,
            Some(p) => p - 1,
            None => self.history.len() - 1,
        };
        self.history_pos = Some(pos);
        self.input = self.history[pos].clone();
    }

    pub fn history_next(&mut self) {
        match self.history_pos {
            Some(p) if p + 1 < self.history.len() => {
                self.history_pos = Some(p + 1);
                self.input = self.history[p + 1].clone();
            }
            _ => {
                self.history_pos = None;
                self.input.clear();
            }
        }
    }

    /// Run the current input line.
    pub fn submit(&mut self) -> Reply {
        let text = std::mem::take(&mut self.input).trim().to_string();
        self.history_pos = None;
        if text.is_empty() {
            return Reply::Lines(Vec::new());
        }

        self.history.push(text.clone());
        self.push(format!("comet> {}", text), ConsoleStyle::Prompt);

        let reply = interpret(&text);
        match &reply {
            Reply::Lines(lines) => {
                for line in lines {
                    let style = if line.starts_with("Error:") || line.starts_with("Unknown") {
                        ConsoleStyle::Error
                    } else {
                        ConsoleStyle::Info
                    };
                    self.push(line.clone(), style);
                }
            }
            Reply::Clear => self.clear(),
            Reply::Call(request) => self.info(format!("{} {} ...", request.method(), request.cmd)),
            Reply::Exit => {}
        }
        reply
    }

    /// Append the outcome of a call started by `submit`.
    pub fn show_response(&mut self, result: Result<ApiResponse, String>) {
        match result {
            Ok(ApiResponse::Json(value)) => {
                for line in json_tree(&value) {
                    let style = ConsoleStyle::Json(line.kind);
                    self.push(line.render(), style);
                }
            }
            Ok(ApiResponse::Text(text)) => {
                self.info("Raw response (not JSON):");
                for line in text.lines() {
                    self.info(line);
                }
            }
            Err(e) => self.error(format!("API request failed: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_interpret_builtins() {
        assert_eq!(interpret("exit"), Reply::Exit);
        assert_eq!(interpret("clear"), Reply::Clear);
        assert_eq!(interpret("   "), Reply::Lines(vec![]));

        let Reply::Lines(lines) = interpret("list categories") else {
            panic!("expected lines");
        };
        assert_eq!(lines.len(), registry::CATEGORIES.len() + 1);

        let Reply::Lines(lines) = interpret("help perks") else {
            panic!("expected lines");
        };
        assert_eq!(lines[0], "Commands in category 'Perks':");

        let Reply::Lines(lines) = interpret("help buyPerk") else {
            panic!("expected lines");
        };
        assert!(lines.contains(&"    --id (int) (Required)".to_string()));
        assert!(lines.contains(&"    --beautify (bool)".to_string()));
    }

    #[test]
    fn test_interpret_unknown_and_search() {
        assert_eq!(
            interpret("frobnicate"),
            Reply::Lines(vec![
                "Unknown command: frobnicate. Type 'help' for a list of commands.".to_string()
            ])
        );
        assert_eq!(
            interpret("search zzzz"),
            Reply::Lines(vec![
                "No commands or categories found matching 'zzzz'.".to_string()
            ])
        );
        assert_eq!(
            interpret("search"),
            Reply::Lines(vec!["Usage: search <keyword>".to_string()])
        );
    }

    #[test]
    fn test_interpret_method_call() {
        match interpret("getForumPosts --count 5") {
            Reply::Call(request) => {
                assert_eq!(request.cmd, "getForumPosts");
                assert_eq!(request.query, vec![("count".to_string(), "5".to_string())]);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            interpret("getForumPosts"),
            Reply::Lines(vec![
                "Error: Missing required parameter --count for command getForumPosts".to_string()
            ])
        );
    }

    #[test]
    fn test_console_submit_history_and_response() {
        let mut console = Console::new();
        console.input = "getAllScripts".into();
        assert!(matches!(console.submit(), Reply::Call(_)));
        assert!(console.input.is_empty());

        console.show_response(Ok(ApiResponse::Json(json!({"a": {"b": 1}}))));
        let tail: Vec<&str> = console.lines().iter().rev().take(2).map(|l| l.text.as_str()).collect();
        assert_eq!(tail, vec!["  b: 1", "a:"]);

        console.show_response(Err("Network error: refused".into()));
        assert_eq!(console.lines().last().unwrap().style, ConsoleStyle::Error);

        console.history_prev();
        assert_eq!(console.input, "getAllScripts");
        console.history_next();
        assert!(console.input.is_empty());

        console.input = "clear".into();
        console.submit();
        assert!(console.lines().is_empty());
    }

    #[test]
    fn test_console_completion() {
        let mut console = Console::new();
        console.input = "getfor".into();
        assert_eq!(console.suggestions(), vec!["getForumPosts"]);
        console.complete();
        assert_eq!(console.input, "getForumPosts");
        console.input = "getForumPosts --co".into();
        assert!(console.suggestions().is_empty());
    }
}
