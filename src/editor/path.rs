use std::fmt;

/// Ordered object keys from the configuration root to one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConfigPath(Vec<String>);

impl ConfigPath {
    pub fn root() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    pub fn child(&self, key: &str) -> Self {
        let mut keys = self.0.clone();
        keys.push(key.to_string());
        Self(keys)
    }

    /// RFC 6901 pointer for `serde_json::Value::pointer`.
    pub fn to_pointer(&self) -> String {
        self.0
            .iter()
            .map(|key| format!("/{}", key.replace('~', "~0").replace('/', "~1")))
            .collect()
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.0.join("."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_escaping() {
        let path = ConfigPath::from_keys(["a/b", "c~d", "e"]);
        assert_eq!(path.to_pointer(), "/a~1b/c~0d/e");
        assert_eq!(ConfigPath::root().to_pointer(), "");
    }

    #[test]
    fn test_child_and_display() {
        let path = ConfigPath::root().child("software").child("script");
        assert_eq!(path.to_string(), "software.script");
        assert_eq!(path, ConfigPath::from_keys(["software", "script"]));
        assert_eq!(ConfigPath::root().to_string(), "<root>");
    }
}
