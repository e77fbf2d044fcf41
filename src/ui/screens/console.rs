use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::cursor_in;
use super::member::kind_style;
use crate::console::ConsoleStyle;
use crate::state::AppState;
use crate::ui::Theme;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let console = &state.console;
    let suggestions = console.suggestions();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(if suggestions.is_empty() { 0 } else { 1 }),
            Constraint::Length(3),
        ])
        .split(area);

    let output = chunks[0];
    let visible = output.height.saturating_sub(2) as usize;
    let total = console.lines().len();
    // `scroll` counts lines up from the bottom
    let end = total.saturating_sub(console.scroll.min(total));
    let start = end.saturating_sub(visible);

    let lines: Vec<Line> = console.lines()[start..end]
        .iter()
        .map(|line| {
            let style = match line.style {
                ConsoleStyle::Prompt => theme.title_style(),
                ConsoleStyle::Info => theme.text_style(),
                ConsoleStyle::Error => theme.error_style(),
                ConsoleStyle::Json(kind) => kind_style(kind, theme),
            };
            Line::styled(line.text.clone(), style)
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Console - [Tab] complete  [↑/↓] history  [PgUp/PgDn] scroll"),
        ),
        output,
    );

    if !suggestions.is_empty() {
        frame.render_widget(
            Paragraph::new(format!(" {}", suggestions.join("  "))).style(theme.muted_style()),
            chunks[1],
        );
    }

    let input_area = chunks[2];
    frame.render_widget(
        Paragraph::new(format!("comet> {}", console.input))
            .block(Block::default().borders(Borders::ALL)),
        input_area,
    );
    let col = "comet> ".len() + console.input.chars().count();
    if let Some(position) = cursor_in(input_area, col, 0) {
        frame.set_cursor_position(position);
    }
}
