pub mod config;
pub mod console;
pub mod dashboard;
pub mod forum;
pub mod help;
pub mod member;
pub mod perks;
pub mod records;
pub mod scripts;
pub mod software;

use ratatui::layout::{Position, Rect};

/// Terminal cell for a text cursor `col` cells right of and `row` lines
/// below the inner top-left corner of a bordered `area`. `None` once it
/// falls outside the area.
pub fn cursor_in(area: Rect, col: usize, row: usize) -> Option<Position> {
    let x = u16::try_from(col).ok()?.checked_add(area.x)?.checked_add(1)?;
    let y = u16::try_from(row).ok()?.checked_add(area.y)?.checked_add(1)?;
    (x < area.right() && y < area.bottom()).then(|| Position::new(x, y))
}
