pub mod loader;
pub mod schema;
pub mod store;

pub use loader::resolve_api_key;
pub use schema::CometConfig;
pub use store::{FileStore, LocalStore};

#[cfg(test)]
pub use store::MemoryStore;
