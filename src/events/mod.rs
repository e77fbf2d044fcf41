pub mod actions;
pub mod handler;
pub mod input;

pub use actions::Action;
pub use handler::handle_event;
pub use input::spawn_reader;
