pub mod forum;
pub mod record;

pub use forum::{posts_from_value, ForumPost};
pub use record::{records_from_value, Record};
