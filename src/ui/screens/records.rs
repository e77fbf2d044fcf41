use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::models::Record;
use crate::ui::Theme;

/// A table column read from one or more record keys.
pub struct Column {
    pub title: &'static str,
    pub keys: &'static [&'static str],
    pub width: Constraint,
}

/// Shared table for the flat record screens.
pub fn render_table(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    title: &str,
    records: &[Record],
    columns: &[Column],
    selected: usize,
) {
    if records.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} - nothing loaded, [r] to refresh", title));
        frame.render_widget(block, area);
        return;
    }

    let header = Row::new(columns.iter().map(|c| Cell::from(c.title)))
        .style(theme.title_style())
        .height(1);

    let used: Vec<&str> = columns.iter().flat_map(|c| c.keys.iter().copied()).collect();
    let rows: Vec<Row> = records
        .iter()
        .map(|record| {
            let mut cells: Vec<Cell> = columns
                .iter()
                .map(|column| {
                    let text = if column.keys.is_empty() {
                        record.summary(&used, 4)
                    } else {
                        record.text(column.keys).unwrap_or_default()
                    };
                    Cell::from(text)
                })
                .collect();
            if cells.is_empty() {
                cells.push(Cell::from(record.display_name()));
            }
            Row::new(cells)
        })
        .collect();

    let widths: Vec<Constraint> = columns.iter().map(|c| c.width).collect();
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .row_highlight_style(theme.selected_style());

    let mut table_state = TableState::default().with_selected(Some(selected.min(records.len() - 1)));
    frame.render_stateful_widget(table, area, &mut table_state);
}
