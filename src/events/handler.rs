use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::Action;
use crate::editor::Control;
use crate::state::{AppState, ConfigMode, CursorMove, InputMode};
use crate::ui::Screen;

/// Convert crossterm events to Actions
pub fn handle_event(event: Event, state: &AppState) -> Action {
    match event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            handle_key_event(key_event, state)
        }
        _ => Action::None,
    }
}

fn handle_key_event(key: KeyEvent, state: &AppState) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    // Text entry owns the keyboard until it ends
    match &state.input_mode {
        InputMode::EditField { .. } => return handle_field_keys(key),
        InputMode::RawText(_) => return handle_raw_keys(key),
        InputMode::Normal => {}
    }
    if state.current_screen == Screen::Console {
        return handle_console_keys(key);
    }

    // Global key bindings
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return Action::Quit,
        (KeyCode::Char('?'), _) => return Action::NavigateTo(Screen::Help),
        (KeyCode::Esc, _) => return Action::NavigateBack,
        (KeyCode::F(2), _) => return Action::ToggleSidebar,
        (KeyCode::F(3), _) => return Action::CycleTheme,
        (KeyCode::Char(digit), KeyModifiers::NONE) if digit.is_ascii_digit() => {
            if let Some(screen) = Screen::from_digit(digit) {
                return Action::NavigateTo(screen);
            }
        }
        _ => {}
    }

    // Screen-specific key bindings
    match state.current_screen {
        Screen::Dashboard => handle_dashboard_keys(key),
        Screen::Scripts => handle_scripts_keys(key),
        Screen::Software | Screen::Member => handle_list_keys(key),
        Screen::Perks => handle_perks_keys(key),
        Screen::Config => handle_config_keys(key, state),
        Screen::Forum => handle_forum_keys(key),
        Screen::Console | Screen::Help => Action::None,
    }
}

fn handle_list_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevious,
        KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
        KeyCode::Char('r') => Action::Refresh,
        _ => Action::None,
    }
}

fn handle_dashboard_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('x') => Action::DismissNotification,
        _ => Action::None,
    }
}

fn handle_scripts_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter | KeyCode::Char('t') => Action::ToggleScript,
        _ => handle_list_keys(key),
    }
}

fn handle_perks_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('b') => Action::BuyPerk,
        _ => handle_list_keys(key),
    }
}

fn handle_forum_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('v') => Action::ToggleForumView,
        KeyCode::Char('e') => Action::ExportForumHtml,
        KeyCode::PageDown => Action::ScrollDown,
        KeyCode::PageUp => Action::ScrollUp,
        _ => handle_list_keys(key),
    }
}

fn handle_config_keys(key: KeyEvent, state: &AppState) -> Action {
    // Shared by both modes
    match key.code {
        KeyCode::Char('m') => return Action::ToggleConfigMode,
        KeyCode::Char('s') => return Action::SaveConfig,
        KeyCode::Char('r') => return Action::FetchConfig,
        KeyCode::Char('R') => return Action::ResetConfig,
        _ => {}
    }

    if state.config_mode == ConfigMode::Raw {
        return match key.code {
            KeyCode::Char('e') | KeyCode::Enter => Action::BeginRawEdit,
            KeyCode::Down | KeyCode::Char('j') => Action::ScrollDown,
            KeyCode::Up | KeyCode::Char('k') => Action::ScrollUp,
            _ => Action::None,
        };
    }

    let selected = state.selected_config_row().map(|row| &row.field.control);
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevious,
        KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
        KeyCode::Left | KeyCode::Char('h') => Action::SelectBadge(false),
        KeyCode::Right | KeyCode::Char('l') => Action::SelectBadge(true),
        KeyCode::Char('a') => Action::BeginBadgeAdd,
        KeyCode::Char('x') | KeyCode::Delete => Action::RemoveBadge,
        KeyCode::Enter | KeyCode::Char(' ') => match selected {
            Some(Control::Toggle(_)) => Action::ConfigToggle,
            Some(Control::NumberList(_)) => Action::BeginBadgeAdd,
            Some(control) if control.is_editable() => Action::BeginFieldEdit,
            _ => Action::None,
        },
        _ => Action::None,
    }
}

fn handle_console_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::NavigateBack,
        KeyCode::Enter => Action::ConsoleSubmit,
        KeyCode::Tab => Action::ConsoleComplete,
        KeyCode::Up => Action::ConsoleHistory(false),
        KeyCode::Down => Action::ConsoleHistory(true),
        KeyCode::PageUp => Action::ScrollUp,
        KeyCode::PageDown => Action::ScrollDown,
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Char(ch) => Action::InputChar(ch),
        _ => Action::None,
    }
}

fn handle_field_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::InputCancel,
        KeyCode::Enter => Action::InputSubmit,
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Char(ch) => Action::InputChar(ch),
        _ => Action::None,
    }
}

fn handle_raw_keys(key: KeyEvent) -> Action {
    match key.code {
        // Esc commits the buffer back into the session
        KeyCode::Esc => Action::InputSubmit,
        KeyCode::Enter => Action::InputNewline,
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Tab => Action::InputChar(' '),
        KeyCode::Left => Action::InputCursor(CursorMove::Left),
        KeyCode::Right => Action::InputCursor(CursorMove::Right),
        KeyCode::Up => Action::InputCursor(CursorMove::Up),
        KeyCode::Down => Action::InputCursor(CursorMove::Down),
        KeyCode::Home => Action::InputCursor(CursorMove::Home),
        KeyCode::End => Action::InputCursor(CursorMove::End),
        KeyCode::Char(ch) => Action::InputChar(ch),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CometConfig;
    use crate::editor::{ConfigPath, ConfigSession};
    use crate::state::FieldInput;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn state_on(screen: Screen) -> AppState {
        let mut state = AppState::new(CometConfig::default());
        state.current_screen = screen;
        state
    }

    #[test]
    fn test_global_keys() {
        let state = state_on(Screen::Scripts);
        assert!(matches!(handle_event(press(KeyCode::Char('q')), &state), Action::Quit));
        assert!(matches!(
            handle_event(press(KeyCode::Char('7')), &state),
            Action::NavigateTo(Screen::Forum)
        ));
        assert!(matches!(
            handle_event(press(KeyCode::Char('?')), &state),
            Action::NavigateTo(Screen::Help)
        ));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(matches!(handle_event(ctrl_c, &state), Action::Quit));
    }

    #[test]
    fn test_console_captures_typing() {
        let state = state_on(Screen::Console);
        assert!(matches!(
            handle_event(press(KeyCode::Char('q')), &state),
            Action::InputChar('q')
        ));
        assert!(matches!(
            handle_event(press(KeyCode::Char('1')), &state),
            Action::InputChar('1')
        ));
        assert!(matches!(handle_event(press(KeyCode::Esc), &state), Action::NavigateBack));
    }

    #[test]
    fn test_field_edit_captures_typing() {
        let mut state = state_on(Screen::Config);
        state.input_mode = InputMode::EditField {
            path: ConfigPath::from_keys(["fov"]),
            kind: FieldInput::Number,
            buffer: String::new(),
        };
        assert!(matches!(
            handle_event(press(KeyCode::Char('q')), &state),
            Action::InputChar('q')
        ));
        assert!(matches!(handle_event(press(KeyCode::Esc), &state), Action::InputCancel));
    }

    #[test]
    fn test_config_enter_depends_on_control() {
        let mut state = state_on(Screen::Config);
        state.config_session = Some(ConfigSession::load(
            r#"{"on": true, "fov": 3, "keys": [1], "g": {}}"#,
        ));
        let expected = ["toggle", "field", "badge", "none"];
        for (row, want) in expected.iter().enumerate() {
            state.selection_state.config_row = row;
            let action = handle_event(press(KeyCode::Enter), &state);
            let got = match action {
                Action::ConfigToggle => "toggle",
                Action::BeginFieldEdit => "field",
                Action::BeginBadgeAdd => "badge",
                Action::None => "none",
                other => panic!("unexpected {:?}", other),
            };
            assert_eq!(got, *want, "row {}", row);
        }
    }
}
