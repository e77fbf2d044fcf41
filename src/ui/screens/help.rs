use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::ui::Theme;

const HELP: &[&str] = &[
    "COMET - Constelia Dashboard",
    "",
    "Global Keybindings:",
    "  q / Ctrl+C    - Quit application",
    "  ?             - Show this help screen",
    "  Esc           - Go back to previous screen",
    "  1-8           - Dashboard, Scripts, Software, Perks, Member, Config, Forum, Console",
    "  F2            - Show/hide the menu bar",
    "  F3            - Cycle colour theme",
    "",
    "Lists:",
    "  ↑ / k, ↓ / j  - Move selection",
    "  r             - Refresh from the server",
    "  Enter / t     - Toggle script (Scripts)",
    "  b             - Buy perk (Perks)",
    "",
    "Config editor:",
    "  Enter / Space - Toggle or edit the selected value",
    "  a / x         - Add / remove a number badge",
    "  ← / →         - Select badge",
    "  m             - Switch visual / raw mode",
    "  e             - Edit raw text (raw mode, Esc to finish)",
    "  s             - Save to server",
    "  r / R         - Reload / reset on server",
    "",
    "Forum:",
    "  v             - Switch BBCode source / HTML view",
    "  e             - Export the selected post as HTML",
    "  PgUp / PgDn   - Scroll post",
    "",
    "Console:",
    "  Enter         - Run command (try 'help')",
    "  Tab           - Complete method name",
    "  ↑ / ↓         - Command history",
    "",
    "Press Esc to return to previous screen",
];

pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
    let list_items: Vec<ListItem> = HELP.iter().map(|item| ListItem::new(*item)).collect();

    let list = List::new(list_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Help - Keybindings")
            .style(theme.title_style()),
    );

    frame.render_widget(list, area);
}
