pub mod app_state;
pub mod async_ops;
pub mod selection;
pub mod text_buffer;

pub use app_state::{AppState, ConfigMode, FieldInput, ForumView, InputMode, NotificationLevel};
pub use async_ops::{AsyncOperation, AsyncOperationResult, OperationType};
pub use text_buffer::{CursorMove, TextBuffer};
