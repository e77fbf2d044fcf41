use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::state::{AppState, ForumView};
use crate::ui::Theme;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    if state.forum_posts.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Forum - no posts loaded, [r] to refresh");
        frame.render_widget(block, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let items: Vec<ListItem> = state
        .forum_posts
        .iter()
        .map(|post| {
            let by = if post.author.is_empty() {
                String::new()
            } else {
                format!(" - {}", post.author)
            };
            ListItem::new(format!("{}{}", post.title, by))
        })
        .collect();

    let selected = state.selection_state.forum_index.min(state.forum_posts.len() - 1);
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Posts"))
        .highlight_style(theme.selected_style());
    let mut list_state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    let Some((post, html)) = state.selected_post() else {
        return;
    };

    let (label, body) = match state.forum_view {
        ForumView::Source => ("BBCode", post.message.as_str()),
        ForumView::Html => ("HTML", html),
    };
    let posted = post
        .posted_at
        .map(|d| format!(" ({})", d.format("%Y-%m-%d %H:%M")))
        .unwrap_or_default();

    let block = Block::default().borders(Borders::ALL).title(format!(
        "{}{} - {}  [v] switch view  [e] export HTML",
        post.title, posted, label
    ));
    let scroll = state.selection_state.forum_scroll.min(u16::MAX as usize) as u16;
    let paragraph = Paragraph::new(body.to_string())
        .block(block)
        .style(theme.text_style())
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, chunks[1]);
}
