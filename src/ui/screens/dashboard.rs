use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::state::{AppState, NotificationLevel};
use crate::ui::Theme;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(rows[0]);

    render_account_summary(frame, columns[0], state);
    render_scripts_summary(frame, columns[1], state);
    render_forum_summary(frame, columns[2], state);
    render_activity(frame, rows[1], state, theme);
}

fn member_field(state: &AppState, keys: &[&str]) -> Option<String> {
    let member = state.member.as_ref()?;
    keys.iter().find_map(|key| match member.get(*key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn render_account_summary(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut items = vec![
        format!(
            "Member: {}",
            member_field(state, &["username", "name"]).unwrap_or_else(|| "-".into())
        ),
        format!("XP: {}", member_field(state, &["xp"]).unwrap_or_else(|| "-".into())),
        String::new(),
        format!("Software: {}", state.software.len()),
        format!("Perks: {}", state.perks.len()),
    ];

    items.push(match &state.config_session {
        Some(session) if !session.is_visual() => "Config: invalid JSON".to_string(),
        Some(session) if session.is_dirty() => "Config: unsaved changes".to_string(),
        Some(_) => "Config: loaded".to_string(),
        None => "Config: not loaded".to_string(),
    });

    let list = List::new(items.into_iter().map(ListItem::new).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title("Account"));
    frame.render_widget(list, area);
}

fn render_scripts_summary(frame: &mut Frame, area: Rect, state: &AppState) {
    let enabled = state
        .scripts
        .iter()
        .filter(|s| s.flag("enabled").or_else(|| s.flag("active")) == Some(true))
        .count();

    let mut list_items: Vec<ListItem> = vec![
        ListItem::new(format!("Total Scripts: {}", state.scripts.len())),
        ListItem::new(format!("Enabled: {}", enabled)),
        ListItem::new(""),
        ListItem::new("Scripts:"),
    ];

    for script in state.scripts.iter().take(5) {
        list_items.push(ListItem::new(format!("  • {}", script.display_name())));
    }

    let list = List::new(list_items).block(Block::default().borders(Borders::ALL).title("Scripts"));
    frame.render_widget(list, area);
}

fn render_forum_summary(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut list_items: Vec<ListItem> = vec![
        ListItem::new(format!("Latest Posts: {}", state.forum_posts.len())),
        ListItem::new(""),
    ];

    for post in state.forum_posts.iter().take(5) {
        let when = post
            .posted_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        list_items.push(ListItem::new(format!("  • {} {}", when, post.title)));
    }

    let list = List::new(list_items).block(Block::default().borders(Borders::ALL).title("Forum"));
    frame.render_widget(list, area);
}

fn render_activity(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let height = area.height.saturating_sub(2) as usize;
    let list_items: Vec<ListItem> = state
        .notifications
        .iter()
        .rev()
        .take(height)
        .map(|n| {
            let style = match n.level {
                NotificationLevel::Info => theme.text_style(),
                NotificationLevel::Success => theme.success_style(),
                NotificationLevel::Warning => theme.warning_style(),
                NotificationLevel::Error => theme.error_style(),
            };
            ListItem::new(format!("{} {}", n.timestamp.format("%H:%M:%S"), n.message)).style(style)
        })
        .collect();

    let list = List::new(list_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Activity - [r] refresh all  [x] dismiss oldest"),
    );
    frame.render_widget(list, area);
}
