use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::client::ApiResult;
use super::constelia::{ApiRequest, ApiResponse, ConsteliaApi};

/// Scripted stand-in for the remote API.
///
/// Responses are queued per `cmd`; an unscripted call answers `null`.
#[derive(Default)]
pub struct FakeApi {
    responses: Mutex<HashMap<String, VecDeque<ApiResult<ApiResponse>>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, cmd: &str, result: ApiResult<ApiResponse>) {
        self.responses
            .lock()
            .unwrap()
            .entry(cmd.to_string())
            .or_default()
            .push_back(result);
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConsteliaApi for FakeApi {
    async fn call(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let scripted = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&request.cmd)
            .and_then(VecDeque::pop_front);
        self.calls.lock().unwrap().push(request);
        scripted.unwrap_or(Ok(ApiResponse::Json(Value::Null)))
    }
}
