use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::VecDeque;

use crate::config::CometConfig;
use crate::console::Console;
use crate::editor::{flatten, ConfigPath, ConfigSession, FormRow};
use crate::models::{ForumPost, Record};
use crate::ui::Screen;

use super::async_ops::AsyncOperation;
use super::selection::SelectionState;
use super::text_buffer::TextBuffer;

/// Notifications kept for the status bar.
const MAX_NOTIFICATIONS: usize = 50;

#[derive(Debug, Clone)]
pub struct AppState {
    // Remote data
    pub scripts: Vec<Record>,
    pub software: Vec<Record>,
    pub perks: Vec<Record>,
    pub member: Option<Value>,
    pub forum_posts: Vec<ForumPost>,
    /// Sanitized HTML per forum post, same order as `forum_posts`.
    pub forum_html: Vec<String>,
    pub config_session: Option<ConfigSession>,
    pub console: Console,

    // UI state
    pub current_screen: Screen,
    pub previous_screen: Vec<Screen>,
    pub selection_state: SelectionState,
    pub input_mode: InputMode,
    pub forum_view: ForumView,
    pub config_mode: ConfigMode,

    // Async operations tracking
    pub pending_operations: Vec<AsyncOperation>,
    pub notifications: VecDeque<Notification>,

    // Persisted local state
    pub config: CometConfig,

    // Application control
    pub should_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForumView {
    #[default]
    Source,
    Html,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigMode {
    #[default]
    Visual,
    Raw,
}

/// What a single-line field edit will do on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    Number,
    Text,
    AddNumber,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputMode {
    #[default]
    Normal,
    EditField {
        path: ConfigPath,
        kind: FieldInput,
        buffer: String,
    },
    RawText(TextBuffer),
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl AppState {
    pub fn new(config: CometConfig) -> Self {
        Self {
            scripts: Vec::new(),
            software: Vec::new(),
            perks: Vec::new(),
            member: None,
            forum_posts: Vec::new(),
            forum_html: Vec::new(),
            config_session: None,
            console: Console::new(),
            current_screen: Screen::default(),
            previous_screen: Vec::new(),
            selection_state: SelectionState::default(),
            input_mode: InputMode::Normal,
            forum_view: ForumView::default(),
            config_mode: ConfigMode::default(),
            pending_operations: Vec::new(),
            notifications: VecDeque::new(),
            config,
            should_quit: false,
        }
    }

    // Navigation methods
    /// Revisiting a screen already on the back stack unwinds to it, so the
    /// stack never holds a screen twice.
    pub fn navigate_to(&mut self, screen: Screen) {
        if screen == self.current_screen {
            return;
        }
        if let Some(position) = self.previous_screen.iter().position(|s| *s == screen) {
            self.previous_screen.truncate(position);
        } else {
            self.previous_screen.push(self.current_screen.clone());
        }
        self.current_screen = screen;
    }

    pub fn navigate_back(&mut self) {
        if let Some(previous) = self.previous_screen.pop() {
            self.current_screen = previous;
        }
    }

    // Notification methods
    pub fn add_notification(&mut self, message: String, level: NotificationLevel) {
        match level {
            NotificationLevel::Error => log::warn!("{}", message),
            _ => log::info!("{}", message),
        }

        self.notifications.push_back(Notification {
            message,
            level,
            timestamp: Utc::now(),
        });

        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.pop_front();
        }
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.pop_front();
    }

    pub fn latest_notification(&self) -> Option<&Notification> {
        self.notifications.back()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_operations.iter().any(AsyncOperation::is_in_progress)
    }

    // Selection helpers
    pub fn selected_script(&self) -> Option<&Record> {
        self.scripts.get(self.selection_state.scripts_index)
    }

    pub fn selected_perk(&self) -> Option<&Record> {
        self.perks.get(self.selection_state.perks_index)
    }

    pub fn selected_post(&self) -> Option<(&ForumPost, &str)> {
        let index = self.selection_state.forum_index;
        let post = self.forum_posts.get(index)?;
        let html = self.forum_html.get(index).map(String::as_str).unwrap_or("");
        Some((post, html))
    }

    /// Rows of the visual configuration form, in display order.
    pub fn config_rows(&self) -> Vec<FormRow<'_>> {
        self.config_session
            .as_ref()
            .and_then(ConfigSession::tree)
            .map(|tree| flatten(tree.form()))
            .unwrap_or_default()
    }

    pub fn selected_config_row(&self) -> Option<FormRow<'_>> {
        self.config_rows()
            .get(self.selection_state.config_row)
            .copied()
    }

    pub fn set_forum_posts(&mut self, posts: Vec<ForumPost>) {
        self.forum_html = posts
            .iter()
            .map(|post| crate::bbcode::to_html(post.message.as_str()))
            .collect();
        self.forum_posts = posts;
        self.selection_state.forum_index = 0;
        self.selection_state.forum_scroll = 0;
    }
}
