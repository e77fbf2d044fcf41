use super::path::ConfigPath;
use super::tree::{ConfigTree, Edit, EditError};

/// Editing state for one configuration document.
///
/// The raw text is always present. The tree exists only while the raw
/// text parses; otherwise the visual editor is unavailable and the raw
/// text is the only editable surface.
#[derive(Debug, Clone, Default)]
pub struct ConfigSession {
    raw: String,
    tree: Option<ConfigTree>,
    parse_error: Option<String>,
    dirty: bool,
}

impl ConfigSession {
    /// Start a session from text fetched from the remote service.
    pub fn load(text: &str) -> Self {
        let mut session = Self::default();
        session.replace_raw(text.to_string());
        session.dirty = false;
        session
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn tree(&self) -> Option<&ConfigTree> {
        self.tree.as_ref()
    }

    pub fn parse_error(&self) -> Option<&str> {
        self.parse_error.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_visual(&self) -> bool {
        self.tree.is_some()
    }

    /// Replace the raw text, as typed in raw mode.
    pub fn set_raw(&mut self, text: String) {
        self.replace_raw(text);
        self.dirty = true;
    }

    fn replace_raw(&mut self, text: String) {
        match ConfigTree::parse(&text) {
            Ok(tree) => {
                // Raw text keeps its formatting until the next visual edit.
                self.tree = Some(tree);
                self.parse_error = None;
            }
            Err(e) => {
                log::debug!("Configuration text does not parse: {}", e);
                self.tree = None;
                self.parse_error = Some(e.to_string());
            }
        }
        self.raw = text;
    }

    /// Apply a visual edit; the raw text becomes the new pretty mirror.
    pub fn edit(&mut self, path: &ConfigPath, edit: Edit) -> Result<(), EditError> {
        let tree = self.tree.as_ref().ok_or(EditError::NotParsed)?;
        let next = tree.apply(path, edit)?;
        self.raw = next.raw().to_string();
        self.tree = Some(next);
        self.dirty = true;
        Ok(())
    }

    /// Text sent back to the service on save. The whole tree is sent.
    pub fn payload(&self) -> Result<String, EditError> {
        let tree = self.tree.as_ref().ok_or(EditError::NotParsed)?;
        Ok(serde_json::to_string(tree.root())?)
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn test_malformed_text_falls_back_to_raw() {
        let mut session = ConfigSession::load("{not json");
        assert!(session.tree().is_none());
        assert!(!session.is_visual());
        assert!(session.parse_error().is_some());
        assert_eq!(session.raw(), "{not json");

        let path = ConfigPath::from_keys(["a"]);
        assert!(matches!(
            session.edit(&path, Edit::SetBool(true)),
            Err(EditError::NotParsed)
        ));
        assert!(matches!(session.payload(), Err(EditError::NotParsed)));
    }

    #[test]
    fn test_fixing_raw_text_restores_visual_editor() {
        let mut session = ConfigSession::load("{not json");
        session.set_raw(r#"{"a": true}"#.to_string());
        assert!(session.is_visual());
        assert!(session.parse_error().is_none());
        assert!(session.is_dirty());
    }

    #[test]
    fn test_visual_edit_updates_raw_mirror() {
        let mut session = ConfigSession::load(r#"{"esp": {"enabled": false, "box_color": "FF0000"}}"#);
        assert!(!session.is_dirty());

        session
            .edit(&ConfigPath::from_keys(["esp", "enabled"]), Edit::SetBool(true))
            .unwrap();

        let mirrored: Value = serde_json::from_str(session.raw()).unwrap();
        assert_eq!(mirrored, json!({"esp": {"enabled": true, "box_color": "FF0000"}}));
        assert!(session.is_dirty());

        let sent: Value = serde_json::from_str(&session.payload().unwrap()).unwrap();
        assert_eq!(sent, mirrored);

        session.mark_saved();
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_failed_edit_leaves_session_untouched() {
        let mut session = ConfigSession::load(r#"{"n": 1}"#);
        let before = session.raw().to_string();
        assert!(session
            .edit(&ConfigPath::from_keys(["n"]), Edit::SetText("x".into()))
            .is_err());
        assert_eq!(session.raw(), before);
        assert!(!session.is_dirty());
    }
}
