use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::editor::{color_rgb, control::format_number, ConfigSession, Control, FormRow};
use crate::state::{AppState, ConfigMode, InputMode};
use crate::ui::Theme;

use super::cursor_in;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(session) = &state.config_session else {
        let block = Block::default().borders(Borders::ALL).title("Config");
        frame.render_widget(
            Paragraph::new("Configuration not loaded. Press r to fetch it.").block(block),
            area,
        );
        return;
    };

    let dirty = if session.is_dirty() { " *" } else { "" };
    match state.config_mode {
        ConfigMode::Visual => render_visual(frame, area, state, session, theme, dirty),
        ConfigMode::Raw => render_raw(frame, area, state, session, theme, dirty),
    }
}

fn render_visual(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &ConfigSession,
    theme: &Theme,
    dirty: &str,
) {
    let block = Block::default().borders(Borders::ALL).title(format!(
        "Config{} - [Enter] edit  [a/x] badges  [m] raw  [s] save  [r] reload  [R] reset",
        dirty
    ));

    if !session.is_visual() {
        let message = format!(
            "The configuration text is not valid JSON, so the visual editor is unavailable.\n\n{}\n\nPress m to fix it in raw mode.",
            session.parse_error().unwrap_or("parse error")
        );
        frame.render_widget(
            Paragraph::new(message)
                .style(theme.error_style())
                .wrap(Wrap { trim: false })
                .block(block),
            area,
        );
        return;
    }

    let rows = state.config_rows();
    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new("The configuration has no editable entries.").block(block),
            area,
        );
        return;
    }

    let selected = state.selection_state.config_row.min(rows.len() - 1);
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| ListItem::new(row_line(row, i == selected, state, theme)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)));
    let mut list_state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn row_line<'a>(row: &FormRow<'a>, selected: bool, state: &AppState, theme: &Theme) -> Line<'a> {
    let field = row.field;
    let mut spans = vec![Span::raw("  ".repeat(row.depth))];

    if let Control::Group(children) = &field.control {
        spans.push(Span::styled(format!("▾ {}", field.key), theme.title_style()));
        spans.push(Span::styled(
            format!("  ({} entries)", children.len()),
            theme.muted_style(),
        ));
        return Line::from(spans);
    }

    spans.push(Span::styled(format!("{}: ", field.key), theme.text_style()));

    if let InputMode::EditField { path, buffer, .. } = &state.input_mode {
        if *path == field.path {
            spans.push(Span::styled(format!("{}▏", buffer), theme.selected_style()));
            return Line::from(spans);
        }
    }

    match &field.control {
        Control::Toggle(on) => spans.push(Span::styled(
            if *on { "[x] on" } else { "[ ] off" },
            if *on { theme.success_style() } else { theme.muted_style() },
        )),
        Control::Number(n) => spans.push(Span::styled(format_number(*n), theme.primary_style())),
        Control::Color(hex) => {
            if let Some((r, g, b)) = color_rgb(hex) {
                spans.push(Span::styled("██ ", Style::default().fg(Color::Rgb(r, g, b))));
            }
            spans.push(Span::styled(hex.clone(), theme.text_style()));
        }
        Control::Text(text) => spans.push(Span::styled(format!("\"{}\"", text), theme.success_style())),
        Control::NumberList(values) => {
            for (i, value) in values.iter().enumerate() {
                let style = if selected && i == state.selection_state.badge_index {
                    theme.selected_style()
                } else {
                    theme.primary_style()
                };
                spans.push(Span::styled(format!("[{}]", format_number(*value)), style));
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled("(+a)", theme.muted_style()));
        }
        Control::Unsupported(kind) => spans.push(Span::styled(
            format!("unsupported type ({})", kind),
            theme.muted_style(),
        )),
        Control::Group(_) => {}
    }
    Line::from(spans)
}

fn render_raw(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &ConfigSession,
    theme: &Theme,
    dirty: &str,
) {
    let editing = match &state.input_mode {
        InputMode::RawText(buffer) => Some(buffer),
        _ => None,
    };

    let title = if editing.is_some() {
        format!("Config{} - raw text (editing, Esc to finish)", dirty)
    } else {
        format!("Config{} - raw text  [e] edit  [m] visual  [s] save", dirty)
    };
    let status_style = if session.is_visual() {
        theme.text_style()
    } else {
        theme.warning_style()
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let lines: Vec<String> = match editing {
        Some(buffer) => buffer.lines().to_vec(),
        None => session.raw().lines().map(str::to_string).collect(),
    };

    let height = area.height.saturating_sub(2) as usize;
    let scroll = match editing {
        Some(buffer) => {
            let (row, _) = buffer.cursor();
            row.saturating_sub(height.saturating_sub(1))
        }
        None => state.selection_state.raw_scroll.min(lines.len().saturating_sub(1)),
    };

    let gutter = lines.len().to_string().len();
    let text: Vec<Line> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            Line::from(vec![
                Span::styled(format!("{:>width$} ", i + 1, width = gutter), theme.muted_style()),
                Span::styled(line.clone(), status_style),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .scroll((scroll.min(u16::MAX as usize) as u16, 0)),
        area,
    );

    if let Some(buffer) = editing {
        let (row, col) = buffer.cursor();
        if let Some(position) = cursor_in(area, gutter + 1 + col, row.saturating_sub(scroll)) {
            frame.set_cursor_position(position);
        }
    }
}
