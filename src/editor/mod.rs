pub mod control;
pub mod path;
pub mod session;
pub mod tree;

pub use control::{color_rgb, flatten, Control, FormRow};
pub use path::ConfigPath;
pub use session::ConfigSession;
pub use tree::Edit;
