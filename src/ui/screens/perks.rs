use ratatui::{layout::Constraint, layout::Rect, Frame};

use super::records::{render_table, Column};
use crate::state::AppState;
use crate::ui::Theme;

const COLUMNS: &[Column] = &[
    Column {
        title: "ID",
        keys: &["id"],
        width: Constraint::Length(5),
    },
    Column {
        title: "Perk",
        keys: &["name", "title"],
        width: Constraint::Percentage(25),
    },
    Column {
        title: "Cost",
        keys: &["cost", "points", "price"],
        width: Constraint::Length(6),
    },
    Column {
        title: "Description",
        keys: &["description", "desc"],
        width: Constraint::Min(20),
    },
];

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    render_table(
        frame,
        area,
        theme,
        "Perks - [b] buy selected  [r] refresh",
        &state.perks,
        COLUMNS,
        state.selection_state.perks_index,
    );
}
