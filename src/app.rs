use anyhow::{bail, Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;
use std::fs;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::api::constelia::{
    buy_perk, get_all_scripts, get_all_software, get_configuration, get_forum_posts, get_member,
    list_perks, reset_configuration, set_configuration, toggle_script_status,
};
use crate::api::{ApiResult, ConsteliaApi};
use crate::config::{CometConfig, LocalStore};
use crate::console::Reply;
use crate::editor::{ConfigPath, ConfigSession, Control, Edit};
use crate::events::{handle_event, spawn_reader, Action};
use crate::state::selection::step;
use crate::state::{
    AppState, AsyncOperation, AsyncOperationResult, ConfigMode, FieldInput, ForumView, InputMode,
    NotificationLevel, OperationType, TextBuffer,
};
use crate::ui::{render, Screen, Theme};

/// Flags sent with every member request.
const MEMBER_FLAGS: &[&str] = &["scripts", "history"];

/// Lines moved per console page.
const CONSOLE_PAGE: usize = 10;

pub struct App {
    pub state: AppState,
    api: Arc<dyn ConsteliaApi>,
    store: Arc<dyn LocalStore>,
    export_dir: PathBuf,
    pub action_tx: mpsc::UnboundedSender<Action>,
    pub action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(
        config: CometConfig,
        api: Arc<dyn ConsteliaApi>,
        store: Arc<dyn LocalStore>,
        export_dir: PathBuf,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            state: AppState::new(config),
            api,
            store,
            export_dir,
            action_tx,
            action_rx,
        }
    }

    /// Main event loop following The Elm Architecture pattern
    pub async fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut events = spawn_reader(event::read);
        self.refresh(Screen::Dashboard);

        loop {
            terminal.draw(|frame| render(frame, &self.state))?;

            // Multiplex between user input and async results
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else {
                        bail!("Terminal input closed");
                    };
                    let action = handle_event(event, &self.state);
                    if !matches!(action, Action::None) {
                        self.update(action)?;
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    self.update(action)?;
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Processes one Action; the only place state changes.
    pub fn update(&mut self, action: Action) -> Result<()> {
        match action {
            // Navigation
            Action::NavigateTo(screen) => {
                if let Some(feature) = screen.feature() {
                    if !self.state.config.settings.feature(feature) {
                        self.state.add_notification(
                            format!("{} is disabled in settings", screen.title()),
                            NotificationLevel::Warning,
                        );
                        return Ok(());
                    }
                }
                self.state.navigate_to(screen.clone());
                if !self.has_data(&screen) {
                    self.refresh(screen);
                }
            }

            Action::NavigateBack => {
                self.state.navigate_back();
            }

            // Remote data
            Action::Refresh => {
                self.refresh(self.state.current_screen.clone());
            }

            Action::ToggleScript => match self.state.selected_script().and_then(|s| s.id()) {
                Some(id) => {
                    let api = self.api.clone();
                    self.spawn_operation(OperationType::ToggleScript(id), async move {
                        toggle_script_status(api.as_ref(), id)
                            .await
                            .map(|response| AsyncOperationResult::ScriptToggled(id, response))
                    });
                }
                None => self.state.add_notification(
                    "No script selected".to_string(),
                    NotificationLevel::Warning,
                ),
            },

            Action::BuyPerk => match self.state.selected_perk().and_then(|p| p.id()) {
                Some(id) => {
                    let api = self.api.clone();
                    self.spawn_operation(OperationType::BuyPerk(id), async move {
                        buy_perk(api.as_ref(), id)
                            .await
                            .map(|response| AsyncOperationResult::PerkBought(id, response))
                    });
                }
                None => self.state.add_notification(
                    "No perk selected".to_string(),
                    NotificationLevel::Warning,
                ),
            },

            // Configuration editor
            Action::FetchConfig => {
                self.spawn_fetch_configuration();
            }

            Action::SaveConfig => {
                let payload = match &self.state.config_session {
                    Some(session) => session.payload(),
                    None => {
                        self.state.add_notification(
                            "No configuration loaded".to_string(),
                            NotificationLevel::Warning,
                        );
                        return Ok(());
                    }
                };
                match payload {
                    Ok(payload) => {
                        let api = self.api.clone();
                        self.spawn_operation(OperationType::SaveConfiguration, async move {
                            set_configuration(api.as_ref(), &payload)
                                .await
                                .map(|_| AsyncOperationResult::ConfigurationSaved)
                        });
                    }
                    Err(e) => self.state.add_notification(
                        format!("Cannot save configuration: {}", e),
                        NotificationLevel::Error,
                    ),
                }
            }

            Action::ResetConfig => {
                let api = self.api.clone();
                self.spawn_operation(OperationType::ResetConfiguration, async move {
                    reset_configuration(api.as_ref())
                        .await
                        .map(|_| AsyncOperationResult::ConfigurationReset)
                });
            }

            Action::ToggleConfigMode => {
                self.state.config_mode = match self.state.config_mode {
                    ConfigMode::Visual => ConfigMode::Raw,
                    ConfigMode::Raw => ConfigMode::Visual,
                };
                self.state.selection_state.raw_scroll = 0;
            }

            Action::ConfigToggle => {
                if let Some((path, Control::Toggle(on))) = self.selected_field() {
                    self.apply_edit(&path, Edit::SetBool(!on));
                }
            }

            Action::BeginFieldEdit => {
                if let Some((path, control)) = self.selected_field() {
                    let kind = match control {
                        Control::Number(_) => FieldInput::Number,
                        Control::Color(_) | Control::Text(_) => FieldInput::Text,
                        _ => return Ok(()),
                    };
                    self.state.input_mode = InputMode::EditField {
                        path,
                        kind,
                        buffer: control.display_value(),
                    };
                }
            }

            Action::BeginBadgeAdd => {
                if let Some((path, Control::NumberList(_))) = self.selected_field() {
                    self.state.input_mode = InputMode::EditField {
                        path,
                        kind: FieldInput::AddNumber,
                        buffer: String::new(),
                    };
                }
            }

            Action::RemoveBadge => {
                if let Some((path, Control::NumberList(values))) = self.selected_field() {
                    if values.is_empty() {
                        return Ok(());
                    }
                    let index = self.state.selection_state.badge_index.min(values.len() - 1);
                    self.apply_edit(&path, Edit::RemoveNumber(index));
                    self.state.selection_state.badge_index =
                        index.min(values.len().saturating_sub(2));
                }
            }

            Action::SelectBadge(forward) => {
                if let Some((_, Control::NumberList(values))) = self.selected_field() {
                    let index = &mut self.state.selection_state.badge_index;
                    *index = step((*index).min(values.len()), values.len(), forward);
                }
            }

            Action::BeginRawEdit => {
                if let Some(session) = &self.state.config_session {
                    self.state.input_mode = InputMode::RawText(TextBuffer::from_text(session.raw()));
                }
            }

            // Forum
            Action::ToggleForumView => {
                self.state.forum_view = match self.state.forum_view {
                    ForumView::Source => ForumView::Html,
                    ForumView::Html => ForumView::Source,
                };
                self.state.selection_state.forum_scroll = 0;
            }

            Action::ExportForumHtml => match self.export_selected_post() {
                Ok(Some(path)) => self.state.add_notification(
                    format!("Exported post to {}", path.display()),
                    NotificationLevel::Success,
                ),
                Ok(None) => self.state.add_notification(
                    "No forum post selected".to_string(),
                    NotificationLevel::Warning,
                ),
                Err(e) => self
                    .state
                    .add_notification(format!("{:#}", e), NotificationLevel::Error),
            },

            // Console
            Action::ConsoleSubmit => match self.state.console.submit() {
                Reply::Call(request) => {
                    let api = self.api.clone();
                    let op_type = OperationType::ConsoleCall(request.cmd.clone());
                    self.spawn_operation(op_type, async move {
                        api.call(request)
                            .await
                            .map(AsyncOperationResult::ConsoleResponse)
                    });
                }
                Reply::Exit => return self.update(Action::Quit),
                Reply::Lines(_) | Reply::Clear => {}
            },

            Action::ConsoleComplete => {
                self.state.console.complete();
            }

            Action::ConsoleHistory(forward) => {
                if forward {
                    self.state.console.history_next();
                } else {
                    self.state.console.history_prev();
                }
            }

            // Text input
            Action::InputChar(ch) => match &mut self.state.input_mode {
                InputMode::EditField { buffer, .. } => buffer.push(ch),
                InputMode::RawText(text) => text.insert(ch),
                InputMode::Normal => {
                    if self.state.current_screen == Screen::Console {
                        self.state.console.input.push(ch);
                    }
                }
            },

            Action::InputBackspace => match &mut self.state.input_mode {
                InputMode::EditField { buffer, .. } => {
                    buffer.pop();
                }
                InputMode::RawText(text) => text.backspace(),
                InputMode::Normal => {
                    if self.state.current_screen == Screen::Console {
                        self.state.console.input.pop();
                    }
                }
            },

            Action::InputNewline => {
                if let InputMode::RawText(text) = &mut self.state.input_mode {
                    text.newline();
                }
            }

            Action::InputCursor(movement) => {
                if let InputMode::RawText(text) = &mut self.state.input_mode {
                    text.move_cursor(movement);
                }
            }

            Action::InputSubmit => match std::mem::take(&mut self.state.input_mode) {
                InputMode::EditField { path, kind, buffer } => {
                    let edit = match kind {
                        FieldInput::Number => Edit::SetNumber(buffer),
                        FieldInput::Text => Edit::SetText(buffer),
                        FieldInput::AddNumber => Edit::AddNumber(buffer),
                    };
                    self.apply_edit(&path, edit);
                }
                InputMode::RawText(text) => self.commit_raw(text.text()),
                InputMode::Normal => {}
            },

            Action::InputCancel => {
                self.state.input_mode = InputMode::Normal;
            }

            // Selection/UI
            Action::SelectNext => self.move_selection(true),
            Action::SelectPrevious => self.move_selection(false),
            Action::ScrollDown => self.scroll(true),
            Action::ScrollUp => self.scroll(false),

            Action::ToggleSidebar => {
                let settings = &mut self.state.config.settings;
                settings.sidebar_collapsed = !settings.sidebar_collapsed;
                self.persist()?;
            }

            Action::CycleTheme => {
                let next = Theme::next_name(&self.state.config.settings.theme);
                self.state.config.settings.theme = next.to_string();
                self.state
                    .add_notification(format!("Theme: {}", next), NotificationLevel::Info);
                self.persist()?;
            }

            // Async operation results
            Action::AsyncOperationCompleted(op_id, result) => {
                let Some(op) = self
                    .state
                    .pending_operations
                    .iter_mut()
                    .find(|o| o.id == op_id)
                else {
                    log::debug!("Result for unknown operation {}", op_id);
                    return Ok(());
                };
                let op_type = op.operation_type.clone();

                match result {
                    Ok(async_result) => {
                        op.complete();
                        self.handle_async_result(async_result);
                    }
                    Err(error) => {
                        op.fail(error.clone());
                        if let OperationType::ConsoleCall(_) = op_type {
                            self.state.console.show_response(Err(error));
                        } else {
                            self.state.add_notification(
                                format!("{} failed: {}", op_type.label(), error),
                                NotificationLevel::Error,
                            );
                        }
                    }
                }
                self.state
                    .pending_operations
                    .retain(AsyncOperation::is_in_progress);
            }

            // Notifications
            Action::DismissNotification => {
                self.state.dismiss_notification();
            }

            // System
            Action::Quit => {
                self.persist()?;
                self.state.should_quit = true;
            }

            Action::None => {}
        }

        Ok(())
    }

    fn handle_async_result(&mut self, result: AsyncOperationResult) {
        match result {
            AsyncOperationResult::Scripts(scripts) => {
                self.state.scripts = scripts;
                self.clamp_index(Screen::Scripts);
            }

            AsyncOperationResult::ScriptToggled(id, response) => {
                self.state.add_notification(
                    format!("Script #{} toggled: {}", id, response.into_text()),
                    NotificationLevel::Success,
                );
                self.refresh(Screen::Scripts);
            }

            AsyncOperationResult::Software(software) => {
                self.state.software = software;
                self.clamp_index(Screen::Software);
            }

            AsyncOperationResult::Perks(perks) => {
                self.state.perks = perks;
                self.clamp_index(Screen::Perks);
            }

            AsyncOperationResult::PerkBought(id, response) => {
                self.state.add_notification(
                    format!("Perk #{} bought: {}", id, response.into_text()),
                    NotificationLevel::Success,
                );
                self.refresh(Screen::Perks);
            }

            AsyncOperationResult::Member(member) => {
                self.state.member = Some(member);
            }

            AsyncOperationResult::Configuration(text) => {
                let session = ConfigSession::load(&text);
                if !session.is_visual() {
                    self.state.add_notification(
                        "Configuration is not valid JSON; use raw mode".to_string(),
                        NotificationLevel::Warning,
                    );
                }
                self.state.config_session = Some(session);
                self.state.input_mode = InputMode::Normal;
                let selection = &mut self.state.selection_state;
                selection.config_row = 0;
                selection.badge_index = 0;
                selection.raw_scroll = 0;
            }

            AsyncOperationResult::ConfigurationSaved => {
                if let Some(session) = &mut self.state.config_session {
                    session.mark_saved();
                }
                self.state.add_notification(
                    "Configuration saved".to_string(),
                    NotificationLevel::Success,
                );
            }

            AsyncOperationResult::ConfigurationReset => {
                self.state.add_notification(
                    "Configuration reset".to_string(),
                    NotificationLevel::Success,
                );
                self.spawn_fetch_configuration();
            }

            AsyncOperationResult::ForumPosts(posts) => {
                self.state.set_forum_posts(posts);
            }

            AsyncOperationResult::ConsoleResponse(response) => {
                self.state.console.show_response(Ok(response));
            }
        }
    }

    fn has_data(&self, screen: &Screen) -> bool {
        match screen {
            Screen::Scripts => !self.state.scripts.is_empty(),
            Screen::Software => !self.state.software.is_empty(),
            Screen::Perks => !self.state.perks.is_empty(),
            Screen::Member => self.state.member.is_some(),
            Screen::Config => self.state.config_session.is_some(),
            Screen::Forum => !self.state.forum_posts.is_empty(),
            Screen::Dashboard | Screen::Console | Screen::Help => true,
        }
    }

    /// Fetch the data a screen shows; the dashboard pulls its summaries.
    fn refresh(&mut self, screen: Screen) {
        if let Some(feature) = screen.feature() {
            if !self.state.config.settings.feature(feature) {
                return;
            }
        }

        let api = self.api.clone();
        match screen {
            Screen::Dashboard => {
                for screen in [
                    Screen::Scripts,
                    Screen::Software,
                    Screen::Perks,
                    Screen::Member,
                    Screen::Forum,
                ] {
                    self.refresh(screen);
                }
            }
            Screen::Scripts => self.spawn_operation(OperationType::FetchScripts, async move {
                get_all_scripts(api.as_ref())
                    .await
                    .map(AsyncOperationResult::Scripts)
            }),
            Screen::Software => self.spawn_operation(OperationType::FetchSoftware, async move {
                get_all_software(api.as_ref())
                    .await
                    .map(AsyncOperationResult::Software)
            }),
            Screen::Perks => self.spawn_operation(OperationType::FetchPerks, async move {
                list_perks(api.as_ref()).await.map(AsyncOperationResult::Perks)
            }),
            Screen::Member => self.spawn_operation(OperationType::FetchMember, async move {
                get_member(api.as_ref(), MEMBER_FLAGS)
                    .await
                    .map(AsyncOperationResult::Member)
            }),
            Screen::Config => self.spawn_fetch_configuration(),
            Screen::Forum => {
                let count = self.state.config.settings.forum_post_count;
                self.spawn_operation(OperationType::FetchForumPosts, async move {
                    get_forum_posts(api.as_ref(), count)
                        .await
                        .map(AsyncOperationResult::ForumPosts)
                });
            }
            Screen::Console | Screen::Help => {}
        }
    }

    fn spawn_fetch_configuration(&mut self) {
        let api = self.api.clone();
        self.spawn_operation(OperationType::FetchConfiguration, async move {
            get_configuration(api.as_ref())
                .await
                .map(AsyncOperationResult::Configuration)
        });
    }

    /// Track an operation and run it on the runtime; the result comes back as an Action.
    fn spawn_operation<F>(&mut self, operation_type: OperationType, task: F)
    where
        F: Future<Output = ApiResult<AsyncOperationResult>> + Send + 'static,
    {
        let op = AsyncOperation::new(operation_type);
        let op_id = op.id;
        log::debug!("{} ({})", op.operation_type.label(), op_id);
        self.state.pending_operations.push(op);

        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = task.await.map_err(String::from);
            let _ = tx.send(Action::AsyncOperationCompleted(op_id, result));
        });
    }

    fn selected_field(&self) -> Option<(ConfigPath, Control)> {
        self.state
            .selected_config_row()
            .map(|row| (row.field.path.clone(), row.field.control.clone()))
    }

    fn apply_edit(&mut self, path: &ConfigPath, edit: Edit) {
        let Some(session) = &mut self.state.config_session else {
            return;
        };
        if let Err(e) = session.edit(path, edit) {
            self.state
                .add_notification(format!("Edit failed: {}", e), NotificationLevel::Error);
        }
    }

    fn commit_raw(&mut self, text: String) {
        let Some(session) = &mut self.state.config_session else {
            return;
        };
        if session.raw() == text {
            return;
        }
        session.set_raw(text);
        let visual = session.is_visual();

        // The form may have shrunk.
        let rows = self.state.config_rows().len();
        let selection = &mut self.state.selection_state;
        selection.config_row = selection.config_row.min(rows.saturating_sub(1));
        selection.badge_index = 0;

        if !visual {
            self.state.add_notification(
                "Configuration text is not valid JSON; the visual editor is unavailable".to_string(),
                NotificationLevel::Warning,
            );
        }
    }

    fn move_selection(&mut self, forward: bool) {
        let rows = self.state.config_rows().len();
        let selection = &mut self.state.selection_state;
        match self.state.current_screen {
            Screen::Scripts => {
                selection.scripts_index = step(selection.scripts_index, self.state.scripts.len(), forward)
            }
            Screen::Software => {
                selection.software_index =
                    step(selection.software_index, self.state.software.len(), forward)
            }
            Screen::Perks => {
                selection.perks_index = step(selection.perks_index, self.state.perks.len(), forward)
            }
            Screen::Forum => {
                selection.forum_index =
                    step(selection.forum_index, self.state.forum_posts.len(), forward);
                selection.forum_scroll = 0;
            }
            Screen::Config => {
                selection.config_row = step(selection.config_row, rows, forward);
                selection.badge_index = 0;
            }
            Screen::Member => {
                selection.member_scroll = if forward {
                    selection.member_scroll + 1
                } else {
                    selection.member_scroll.saturating_sub(1)
                };
            }
            _ => {}
        }
    }

    fn scroll(&mut self, down: bool) {
        let selection = &mut self.state.selection_state;
        let target = match self.state.current_screen {
            Screen::Forum => &mut selection.forum_scroll,
            Screen::Member => &mut selection.member_scroll,
            Screen::Config => &mut selection.raw_scroll,
            Screen::Console => {
                let console = &mut self.state.console;
                let max = console.lines().len();
                console.scroll = if down {
                    console.scroll.saturating_sub(CONSOLE_PAGE)
                } else {
                    (console.scroll + CONSOLE_PAGE).min(max)
                };
                return;
            }
            _ => return,
        };
        *target = if down {
            *target + 1
        } else {
            target.saturating_sub(1)
        };
    }

    fn clamp_index(&mut self, screen: Screen) {
        let selection = &mut self.state.selection_state;
        let (index, len) = match screen {
            Screen::Scripts => (&mut selection.scripts_index, self.state.scripts.len()),
            Screen::Software => (&mut selection.software_index, self.state.software.len()),
            Screen::Perks => (&mut selection.perks_index, self.state.perks.len()),
            _ => return,
        };
        *index = (*index).min(len.saturating_sub(1));
    }

    /// Write the selected post's sanitized HTML to `forum-post-N.html`.
    fn export_selected_post(&self) -> Result<Option<PathBuf>> {
        let Some((post, html)) = self.state.selected_post() else {
            return Ok(None);
        };

        fs::create_dir_all(&self.export_dir).with_context(|| {
            format!("Failed to create export directory: {}", self.export_dir.display())
        })?;

        let path = self.export_dir.join(format!(
            "forum-post-{}.html",
            self.state.selection_state.forum_index + 1
        ));
        let document = format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
            ammonia::clean_text(&post.title),
            html
        );
        fs::write(&path, document)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        log::info!("Exported forum post to {}", path.display());
        Ok(Some(path))
    }

    fn persist(&self) -> Result<()> {
        if self.state.config.settings.auto_save {
            self.store
                .save(&self.state.config)
                .with_context(|| format!("Failed to save settings to {}", self.store.location()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::api::error::ApiError;
    use crate::api::ApiResponse;
    use crate::config::MemoryStore;
    use crate::console::ConsoleStyle;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    struct Harness {
        app: App,
        api: Arc<FakeApi>,
        store: Arc<MemoryStore>,
        _dir: TempDir,
    }

    fn harness(api: FakeApi) -> Harness {
        let api = Arc::new(api);
        let store = Arc::new(MemoryStore::with(CometConfig::default()));
        let dir = TempDir::new().unwrap();
        let app = App::new(
            CometConfig::default(),
            api.clone(),
            store.clone(),
            dir.path().join("exports"),
        );
        Harness {
            app,
            api,
            store,
            _dir: dir,
        }
    }

    impl Harness {
        /// Feed every spawned result back through `update`.
        async fn settle(&mut self) {
            while self.app.state.is_loading() {
                let action = self.app.action_rx.recv().await.unwrap();
                self.app.update(action).unwrap();
            }
        }
    }

    fn json(value: serde_json::Value) -> ApiResult<ApiResponse> {
        Ok(ApiResponse::Json(value))
    }

    #[tokio::test]
    async fn test_navigation_fetches_missing_data() {
        let api = FakeApi::new();
        api.respond("getAllScripts", json(json!([{"id": 7, "name": "aim"}])));
        let mut h = harness(api);

        h.app.update(Action::NavigateTo(Screen::Scripts)).unwrap();
        assert_eq!(h.app.state.pending_operations.len(), 1);
        h.settle().await;

        assert_eq!(h.app.state.current_screen, Screen::Scripts);
        assert_eq!(h.app.state.scripts.len(), 1);
        assert!(h.app.state.pending_operations.is_empty());

        // Data present: no second fetch
        h.app.update(Action::NavigateTo(Screen::Dashboard)).unwrap();
        h.app.update(Action::NavigateTo(Screen::Scripts)).unwrap();
        assert!(h.app.state.pending_operations.is_empty());
    }

    #[tokio::test]
    async fn test_disabled_feature_blocks_navigation() {
        let mut h = harness(FakeApi::new());
        h.app
            .state
            .config
            .settings
            .features
            .insert("forum".into(), false);

        h.app.update(Action::NavigateTo(Screen::Forum)).unwrap();
        assert_eq!(h.app.state.current_screen, Screen::Dashboard);
        assert_eq!(
            h.app.state.latest_notification().unwrap().level,
            NotificationLevel::Warning
        );

        h.app.update(Action::Refresh).unwrap();
        h.settle().await;
        assert!(h.api.calls().iter().all(|c| c.cmd != "getForumPosts"));
    }

    #[tokio::test]
    async fn test_toggle_script_refreshes_list() {
        let api = FakeApi::new();
        api.respond("getAllScripts", json(json!([{"id": 3, "name": "esp"}])));
        api.respond("toggleScriptStatus", Ok(ApiResponse::Text("ok".into())));
        let mut h = harness(api);

        h.app.update(Action::NavigateTo(Screen::Scripts)).unwrap();
        h.settle().await;
        h.app.update(Action::ToggleScript).unwrap();
        h.settle().await;

        let cmds: Vec<String> = h.api.calls().into_iter().map(|c| c.cmd).collect();
        assert_eq!(cmds, vec!["getAllScripts", "toggleScriptStatus", "getAllScripts"]);
        assert!(h
            .app
            .state
            .notifications
            .iter()
            .any(|n| n.message == "Script #3 toggled: ok"));
    }

    #[tokio::test]
    async fn test_failed_fetch_is_reported_once() {
        let api = FakeApi::new();
        api.respond("getAllSoftware", Err(ApiError::Remote("bad key".into())));
        let mut h = harness(api);

        h.app.update(Action::NavigateTo(Screen::Software)).unwrap();
        h.settle().await;

        let errors: Vec<_> = h
            .app
            .state
            .notifications
            .iter()
            .filter(|n| n.level == NotificationLevel::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Loading software failed: API error: bad key");
        assert_eq!(h.api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_config_edit_and_save_sends_whole_tree() {
        let api = FakeApi::new();
        api.respond(
            "getConfiguration",
            Ok(ApiResponse::Text(r#"{"aim": {"enabled": false, "fov": 3}}"#.into())),
        );
        let mut h = harness(api);

        h.app.update(Action::NavigateTo(Screen::Config)).unwrap();
        h.settle().await;

        // rows: aim, enabled, fov
        h.app.state.selection_state.config_row = 1;
        h.app.update(Action::ConfigToggle).unwrap();

        h.app.state.selection_state.config_row = 2;
        h.app.update(Action::BeginFieldEdit).unwrap();
        h.app.update(Action::InputBackspace).unwrap();
        for ch in "4.5".chars() {
            h.app.update(Action::InputChar(ch)).unwrap();
        }
        h.app.update(Action::InputSubmit).unwrap();
        assert!(h.app.state.config_session.as_ref().unwrap().is_dirty());

        h.app.update(Action::SaveConfig).unwrap();
        h.settle().await;

        let save = h
            .api
            .calls()
            .into_iter()
            .find(|c| c.cmd == "setConfiguration")
            .unwrap();
        assert_eq!(
            save.form,
            vec![(
                "value".to_string(),
                r#"{"aim":{"enabled":true,"fov":4.5}}"#.to_string()
            )]
        );
        assert!(!h.app.state.config_session.as_ref().unwrap().is_dirty());
    }

    #[tokio::test]
    async fn test_invalid_raw_text_blocks_save() {
        let api = FakeApi::new();
        api.respond("getConfiguration", Ok(ApiResponse::Text("{}".into())));
        let mut h = harness(api);

        h.app.update(Action::NavigateTo(Screen::Config)).unwrap();
        h.settle().await;
        h.app.update(Action::ToggleConfigMode).unwrap();
        h.app.update(Action::BeginRawEdit).unwrap();
        h.app.update(Action::InputChar('x')).unwrap();
        h.app.update(Action::InputSubmit).unwrap();

        let session = h.app.state.config_session.as_ref().unwrap();
        assert_eq!(session.raw(), "x{}");
        assert!(!session.is_visual());

        h.app.update(Action::SaveConfig).unwrap();
        assert!(h.app.state.pending_operations.is_empty());
        assert_eq!(
            h.app.state.latest_notification().unwrap().level,
            NotificationLevel::Error
        );
    }

    #[tokio::test]
    async fn test_raw_edit_that_shrinks_form_keeps_selection_in_range() {
        let api = FakeApi::new();
        api.respond(
            "getConfiguration",
            Ok(ApiResponse::Text(r#"{"a": true, "b": true, "c": {"d": [1]}}"#.into())),
        );
        let mut h = harness(api);

        h.app.update(Action::FetchConfig).unwrap();
        h.settle().await;
        assert_eq!(h.app.state.config_rows().len(), 4);
        h.app.state.selection_state.config_row = 3;
        h.app.state.selection_state.badge_index = 1;

        h.app.state.input_mode = InputMode::RawText(TextBuffer::from_text(r#"{"z": false}"#));
        h.app.update(Action::InputSubmit).unwrap();

        assert_eq!(h.app.state.selection_state.config_row, 0);
        assert_eq!(h.app.state.selection_state.badge_index, 0);
        h.app.update(Action::ConfigToggle).unwrap();
        let session = h.app.state.config_session.as_ref().unwrap();
        assert_eq!(session.tree().unwrap().root(), &serde_json::json!({"z": true}));
    }

    #[tokio::test]
    async fn test_badges_add_and_remove() {
        let api = FakeApi::new();
        api.respond("getConfiguration", Ok(ApiResponse::Text(r#"{"keys": [1, 2]}"#.into())));
        let mut h = harness(api);

        h.app.update(Action::FetchConfig).unwrap();
        h.settle().await;

        h.app.update(Action::BeginBadgeAdd).unwrap();
        h.app.update(Action::InputChar('9')).unwrap();
        h.app.update(Action::InputSubmit).unwrap();

        h.app.update(Action::SelectBadge(false)).unwrap();
        assert_eq!(h.app.state.selection_state.badge_index, 2);
        h.app.update(Action::RemoveBadge).unwrap();
        h.app.update(Action::RemoveBadge).unwrap();

        let session = h.app.state.config_session.as_ref().unwrap();
        let root = session.tree().unwrap().root().clone();
        assert_eq!(root, serde_json::json!({"keys": [1]}));
        assert_eq!(h.app.state.selection_state.badge_index, 0);
    }

    #[tokio::test]
    async fn test_console_call_and_error() {
        let api = FakeApi::new();
        api.respond("getForumPosts", json(json!({"ok": true})));
        api.respond("getForumPosts", Err(ApiError::Timeout));
        let mut h = harness(api);
        h.app.state.current_screen = Screen::Console;

        for _ in 0..2 {
            h.app.state.console.input = "getForumPosts --count 2".into();
            h.app.update(Action::ConsoleSubmit).unwrap();
            h.settle().await;
        }

        let lines = h.app.state.console.lines();
        assert!(lines.iter().any(|l| l.text == "ok: true"));
        let last = lines.last().unwrap();
        assert_eq!(last.style, ConsoleStyle::Error);
        assert_eq!(last.text, "API request failed: Timeout");
        assert!(h.app.state.notifications.is_empty());

        h.app.state.console.input = "exit".into();
        h.app.update(Action::ConsoleSubmit).unwrap();
        assert!(h.app.state.should_quit);
    }

    #[tokio::test]
    async fn test_forum_export_writes_sanitized_html() {
        let api = FakeApi::new();
        api.respond(
            "getForumPosts",
            json(json!([{"title": "News", "message": "[b]hi[/b]<script>x</script>"}])),
        );
        let mut h = harness(api);

        h.app.update(Action::NavigateTo(Screen::Forum)).unwrap();
        h.settle().await;
        h.app.update(Action::ExportForumHtml).unwrap();

        let path = h.app.export_dir.join("forum-post-1.html");
        let written = fs::read_to_string(path).unwrap();
        assert!(written.contains("<strong>hi</strong>"));
        assert!(!written.contains("<script"));
        assert_eq!(
            h.app.state.latest_notification().unwrap().level,
            NotificationLevel::Success
        );
    }

    #[tokio::test]
    async fn test_settings_changes_are_persisted() {
        let mut h = harness(FakeApi::new());

        h.app.update(Action::ToggleSidebar).unwrap();
        h.app.update(Action::CycleTheme).unwrap();
        assert_eq!(h.store.save_count(), 2);
        let saved = h.store.saved();
        assert!(saved.settings.sidebar_collapsed);
        assert_eq!(saved.settings.theme, "constellation");

        h.app.state.config.settings.auto_save = false;
        h.app.update(Action::Quit).unwrap();
        assert_eq!(h.store.save_count(), 2);
        assert!(h.app.state.should_quit);
    }
}
