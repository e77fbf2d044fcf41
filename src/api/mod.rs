pub mod client;
pub mod constelia;
pub mod error;
#[cfg(test)]
pub mod fake;

pub use client::{ApiClient, ApiResult};
pub use constelia::{ApiRequest, ApiResponse, ConsteliaApi, ConsteliaClient, DEFAULT_BASE_URL};
