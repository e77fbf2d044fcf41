//! BBCode to HTML conversion for forum posts.
//!
//! The conversion is a fixed, ordered pipeline of substitutions (see
//! [`rules::STAGES`]) followed by an allow-list sanitizer. Later stages
//! see the HTML produced by earlier ones, so the order is part of the
//! output contract. Tags that do not match a rule are left as literal
//! text.

pub mod rules;
pub mod sanitize;

/// Convert a forum message to sanitized HTML.
///
/// Accepts either a `&str` or an `Option<&str>`; absent or empty input
/// yields an empty string.
pub fn to_html<'a>(input: impl Into<Option<&'a str>>) -> String {
    let Some(text) = input.into() else {
        return String::new();
    };
    if text.is_empty() {
        return String::new();
    }

    let converted = rules::convert(text);
    sanitize::clean(&converted)
}
