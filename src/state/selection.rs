use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionState {
    pub scripts_index: usize,
    pub software_index: usize,
    pub perks_index: usize,
    pub forum_index: usize,
    pub config_row: usize,
    pub badge_index: usize,
    pub member_scroll: usize,
    pub forum_scroll: usize,
    pub raw_scroll: usize,
}

/// Wrapping step through a list of `len` items.
pub fn step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        0
    } else if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}
