use ratatui::{layout::Constraint, layout::Rect, Frame};

use super::records::{render_table, Column};
use crate::state::AppState;
use crate::ui::Theme;

const COLUMNS: &[Column] = &[
    Column {
        title: "Name",
        keys: &["name", "key", "software"],
        width: Constraint::Percentage(25),
    },
    Column {
        title: "Version",
        keys: &["version", "build"],
        width: Constraint::Length(10),
    },
    Column {
        title: "Status",
        keys: &["status", "elapsed", "updated"],
        width: Constraint::Percentage(15),
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
        "Software - [r] refresh",
        &state.software,
        COLUMNS,
        state.selection_state.software_index,
    );
}
