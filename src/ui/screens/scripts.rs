use ratatui::{layout::Constraint, layout::Rect, Frame};

use super::records::{render_table, Column};
use crate::state::AppState;
use crate::ui::Theme;

const COLUMNS: &[Column] = &[
    Column {
        title: "ID",
        keys: &["id"],
        width: Constraint::Length(7),
    },
    Column {
        title: "Name",
        keys: &["name", "title"],
        width: Constraint::Percentage(30),
    },
    Column {
        title: "Author",
        keys: &["author", "username"],
        width: Constraint::Percentage(15),
    },
    Column {
        title: "Enabled",
        keys: &["enabled", "active", "status"],
        width: Constraint::Length(8),
    },
    Column {
        title: "Details",
        keys: &[],
        width: Constraint::Min(10),
    },
];

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    render_table(
        frame,
        area,
        theme,
        "Scripts - [Enter/t] toggle  [r] refresh",
        &state.scripts,
        COLUMNS,
        state.selection_state.scripts_index,
    );
}
