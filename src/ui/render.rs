use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{screens, Screen, Theme};
use crate::state::{AppState, NotificationLevel};

pub fn render(frame: &mut Frame, state: &AppState) {
    let theme = Theme::named(&state.config.settings.theme);
    let show_menu = !state.config.settings.sidebar_collapsed;

    // Main layout: header, menu, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(if show_menu { 1 } else { 0 }),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let header = Paragraph::new(format!(
        "COMET - Constelia Dashboard  |  {}        [?] Help  [q] Quit",
        state.current_screen.title()
    ))
    .style(theme.title_style());
    frame.render_widget(header, chunks[0]);

    if show_menu {
        render_menu(frame, chunks[1], state, &theme);
    }

    render_main_content(frame, chunks[2], state, &theme);
    render_status(frame, chunks[3], state, &theme);
}

fn render_menu(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let spans: Vec<Span> = Screen::MENU
        .iter()
        .enumerate()
        .map(|(i, screen)| {
            let label = format!(" [{}] {} ", i + 1, screen.title());
            let enabled = screen
                .feature()
                .map_or(true, |name| state.config.settings.feature(name));
            if *screen == state.current_screen {
                Span::styled(label, theme.selected_style())
            } else if !enabled {
                Span::styled(label, theme.muted_style())
            } else {
                Span::raw(label)
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (text, style) = if state.is_loading() {
        let in_progress: Vec<String> = state
            .pending_operations
            .iter()
            .filter(|op| op.is_in_progress())
            .map(|op| op.operation_type.label())
            .collect();
        let label = in_progress.last().map(String::as_str).unwrap_or_default();
        (format!("{}... ({} pending)", label, in_progress.len()), theme.warning_style())
    } else if let Some(notification) = state.latest_notification() {
        let style = match notification.level {
            NotificationLevel::Info => theme.text_style(),
            NotificationLevel::Success => theme.success_style(),
            NotificationLevel::Warning => theme.warning_style(),
            NotificationLevel::Error => theme.error_style(),
        };
        (
            format!(
                "[{}] {}",
                notification.timestamp.format("%H:%M:%S"),
                notification.message
            ),
            style,
        )
    } else {
        (
            format!(
                "Ready | Scripts: {} | Software: {} | Perks: {} | Posts: {}",
                state.scripts.len(),
                state.software.len(),
                state.perks.len(),
                state.forum_posts.len()
            ),
            theme.text_style(),
        )
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

fn render_main_content(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    match &state.current_screen {
        Screen::Dashboard => screens::dashboard::render(frame, area, state, theme),
        Screen::Scripts => screens::scripts::render(frame, area, state, theme),
        Screen::Software => screens::software::render(frame, area, state, theme),
        Screen::Perks => screens::perks::render(frame, area, state, theme),
        Screen::Member => screens::member::render(frame, area, state, theme),
        Screen::Config => screens::config::render(frame, area, state, theme),
        Screen::Forum => screens::forum::render(frame, area, state, theme),
        Screen::Console => screens::console::render(frame, area, state, theme),
        Screen::Help => screens::help::render(frame, area, theme),
    }
}
