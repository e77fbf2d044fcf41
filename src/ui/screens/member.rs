use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::console::{json_tree, LineKind};
use crate::state::AppState;
use crate::ui::Theme;

pub fn kind_style(kind: LineKind, theme: &Theme) -> ratatui::style::Style {
    match kind {
        LineKind::Branch => theme.title_style(),
        LineKind::Null | LineKind::Empty => theme.muted_style(),
        LineKind::Bool => theme.warning_style(),
        LineKind::Number => theme.primary_style(),
        LineKind::Text => theme.success_style(),
        LineKind::Alert => theme.error_style(),
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Member - [r] refresh  [j/k] scroll");

    let Some(member) = &state.member else {
        frame.render_widget(
            Paragraph::new("Member information not loaded. Press r to fetch it.").block(block),
            area,
        );
        return;
    };

    let lines: Vec<Line> = json_tree(member)
        .into_iter()
        .map(|line| Line::styled(line.render(), kind_style(line.kind, theme)))
        .collect();

    let scroll = state.selection_state.member_scroll.min(u16::MAX as usize) as u16;
    frame.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}
