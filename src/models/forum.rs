use chrono::{DateTime, Utc};
use serde_json::Value;

use super::record::{records_from_value, Record};

/// A forum post with its BBCode body.
#[derive(Debug, Clone, PartialEq)]
pub struct ForumPost {
    pub title: String,
    pub author: String,
    pub message: String,
    pub posted_at: Option<DateTime<Utc>>,
    pub record: Record,
}

const TITLE_KEYS: &[&str] = &["title", "thread_title", "subject", "thread"];
const AUTHOR_KEYS: &[&str] = &["author", "username", "poster", "user"];
const MESSAGE_KEYS: &[&str] = &["message", "content", "body", "post"];
const DATE_KEYS: &[&str] = &["post_date", "date", "timestamp", "created"];

impl ForumPost {
    pub fn from_record(record: Record) -> Self {
        let posted_at = DATE_KEYS
            .iter()
            .find_map(|key| record.get(key))
            .and_then(parse_timestamp);

        Self {
            title: record
                .text(TITLE_KEYS)
                .unwrap_or_else(|| "(untitled)".to_string()),
            author: record.text(AUTHOR_KEYS).unwrap_or_default(),
            message: record.text(MESSAGE_KEYS).unwrap_or_default(),
            posted_at,
            record,
        }
    }
}

/// Unix seconds (number or numeric string) or an RFC 3339 string.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => DateTime::from_timestamp(n.as_i64()?, 0),
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(secs) => DateTime::from_timestamp(secs, 0),
            Err(_) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        },
        _ => None,
    }
}

pub fn posts_from_value(value: Value) -> Vec<ForumPost> {
    records_from_value(value)
        .into_iter()
        .map(ForumPost::from_record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_posts_from_value() {
        let posts = posts_from_value(json!([
            {"title": "Update", "username": "typedef", "message": "[b]hi[/b]", "post_date": 1700000000},
            {"subject": "Other", "content": "x", "date": "2024-01-02T03:04:05Z"},
            {"message": "no title", "timestamp": "bogus"}
        ]));

        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].title, "Update");
        assert_eq!(posts[0].author, "typedef");
        assert_eq!(posts[0].message, "[b]hi[/b]");
        assert_eq!(posts[0].posted_at.map(|d| d.timestamp()), Some(1_700_000_000));
        assert_eq!(
            posts[1].posted_at.map(|d| d.to_rfc3339()),
            Some("2024-01-02T03:04:05+00:00".to_string())
        );
        assert_eq!(posts[2].title, "(untitled)");
        assert!(posts[2].posted_at.is_none());
    }
}
