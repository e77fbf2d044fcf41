use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::models::{posts_from_value, records_from_value, ForumPost, Record};

use super::client::{ApiClient, ApiResult};
use super::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://constelia.ai/api.php";

/// One call to the remote API: a `cmd` plus query and form parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiRequest {
    pub cmd: String,
    pub query: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            ..Default::default()
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    pub fn flag(self, name: impl Into<String>) -> Self {
        self.param(name, true)
    }

    pub fn post(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.form.push((name.into(), value.to_string()));
        self
    }

    pub fn beautify(self) -> Self {
        self.flag("beautify")
    }

    /// Any form parameter turns the call into a POST.
    pub fn is_post(&self) -> bool {
        !self.form.is_empty()
    }

    pub fn method(&self) -> &'static str {
        if self.is_post() {
            "POST"
        } else {
            "GET"
        }
    }
}

/// A successful response body, already unwrapped.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Json(Value),
    Text(String),
}

fn pre_wrapper() -> &'static Regex {
    static PRE: OnceLock<Regex> = OnceLock::new();
    PRE.get_or_init(|| Regex::new(r"(?is)^<pre[^>]*>(.*)</pre>$").expect("valid pre pattern"))
}

/// Trim the body and drop a surrounding `<pre>` element.
pub fn strip_pre(body: &str) -> &str {
    let trimmed = body.trim();
    match pre_wrapper().captures(trimmed).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => trimmed,
    }
}

fn remote_error(value: &Value) -> Option<String> {
    match value.as_object()?.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

impl ApiResponse {
    /// Classify a raw HTTP response.
    pub fn from_body(status: u16, body: &str) -> ApiResult<Self> {
        if !(200..300).contains(&status) {
            return Err(ApiError::ServerError {
                status,
                message: strip_pre(body).to_string(),
            });
        }

        let body = strip_pre(body);
        match serde_json::from_str::<Value>(body) {
            Ok(value) => match remote_error(&value) {
                Some(message) => Err(ApiError::Remote(message)),
                None => Ok(ApiResponse::Json(value)),
            },
            Err(_) => Ok(ApiResponse::Text(body.to_string())),
        }
    }

    pub fn into_json(self) -> ApiResult<Value> {
        match self {
            ApiResponse::Json(value) => Ok(value),
            ApiResponse::Text(text) => Err(ApiError::InvalidResponse(format!(
                "could not parse response as JSON: {}",
                preview(&text)
            ))),
        }
    }

    /// Body as display text; JSON is pretty-printed.
    pub fn into_text(self) -> String {
        match self {
            ApiResponse::Json(Value::String(text)) => text,
            ApiResponse::Json(value) => {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            }
            ApiResponse::Text(text) => text,
        }
    }
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(80).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// The remote API as seen by the dashboard.
#[async_trait]
pub trait ConsteliaApi: Send + Sync {
    async fn call(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

/// reqwest-backed implementation.
#[derive(Clone)]
pub struct ConsteliaClient {
    client: ApiClient,
    base_url: String,
    api_key: String,
}

impl ConsteliaClient {
    pub fn new(client: ApiClient, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ConsteliaApi for ConsteliaClient {
    async fn call(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        if self.api_key.is_empty() {
            return Err(ApiError::MissingApiKey);
        }

        log::info!("{} {}", request.method(), request.cmd);

        let mut query: Vec<(&str, &str)> = vec![
            ("key", self.api_key.as_str()),
            ("cmd", request.cmd.as_str()),
        ];
        query.extend(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let http = self.client.client();
        let builder = if request.is_post() {
            http.post(&self.base_url).query(&query).form(&request.form)
        } else {
            http.get(&self.base_url).query(&query)
        };

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::NetworkError(e)
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        log::debug!("{} -> {} ({} bytes)", request.cmd, status, body.len());

        ApiResponse::from_body(status, &body)
    }
}

// Typed calls used by the dashboard screens.

/// Cloud configuration as raw text, ready for the editor.
pub async fn get_configuration(api: &dyn ConsteliaApi) -> ApiResult<String> {
    let response = api.call(ApiRequest::new("getConfiguration")).await?;
    Ok(response.into_text())
}

/// Upload the whole configuration document.
pub async fn set_configuration(api: &dyn ConsteliaApi, value: &str) -> ApiResult<ApiResponse> {
    api.call(ApiRequest::new("setConfiguration").post("value", value))
        .await
}

pub async fn reset_configuration(api: &dyn ConsteliaApi) -> ApiResult<ApiResponse> {
    api.call(ApiRequest::new("resetConfiguration")).await
}

pub async fn get_all_scripts(api: &dyn ConsteliaApi) -> ApiResult<Vec<Record>> {
    let value = api.call(ApiRequest::new("getAllScripts")).await?.into_json()?;
    Ok(records_from_value(value))
}

pub async fn toggle_script_status(api: &dyn ConsteliaApi, id: i64) -> ApiResult<ApiResponse> {
    api.call(ApiRequest::new("toggleScriptStatus").param("id", id))
        .await
}

pub async fn get_all_software(api: &dyn ConsteliaApi) -> ApiResult<Vec<Record>> {
    let value = api.call(ApiRequest::new("getAllSoftware")).await?.into_json()?;
    Ok(records_from_value(value))
}

pub async fn list_perks(api: &dyn ConsteliaApi) -> ApiResult<Vec<Record>> {
    let value = api.call(ApiRequest::new("listPerks")).await?.into_json()?;
    Ok(records_from_value(value))
}

pub async fn buy_perk(api: &dyn ConsteliaApi, id: i64) -> ApiResult<ApiResponse> {
    api.call(ApiRequest::new("buyPerk").param("id", id)).await
}

/// Member information; each entry of `flags` is sent as `--flag`.
pub async fn get_member(api: &dyn ConsteliaApi, flags: &[&str]) -> ApiResult<Value> {
    let request = flags
        .iter()
        .fold(ApiRequest::new("getMember"), |request, flag| request.flag(*flag));
    api.call(request).await?.into_json()
}

pub async fn get_forum_posts(api: &dyn ConsteliaApi, count: u32) -> ApiResult<Vec<ForumPost>> {
    let value = api
        .call(ApiRequest::new("getForumPosts").param("count", count))
        .await?
        .into_json()?;
    Ok(posts_from_value(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_method_follows_form_params() {
        let get = ApiRequest::new("getMember").flag("xp");
        assert_eq!(get.method(), "GET");
        assert_eq!(get.query, vec![("xp".to_string(), "true".to_string())]);

        let post = ApiRequest::new("setConfiguration").post("value", "{}");
        assert!(post.is_post());
        assert_eq!(post.method(), "POST");
    }

    #[test]
    fn test_from_body_json_and_text() {
        assert_eq!(
            ApiResponse::from_body(200, " {\"a\": 1} ").unwrap(),
            ApiResponse::Json(json!({"a": 1}))
        );
        assert_eq!(
            ApiResponse::from_body(200, "plain words").unwrap(),
            ApiResponse::Text("plain words".to_string())
        );
    }

    #[test]
    fn test_from_body_strips_pre_wrapper() {
        let body = "\n<pre>{\"x\": [1, 2]}</pre>\n";
        assert_eq!(
            ApiResponse::from_body(200, body).unwrap(),
            ApiResponse::Json(json!({"x": [1, 2]}))
        );
        assert_eq!(strip_pre("<PRE class=\"a\">\n text \n</PRE>"), "text");
        assert_eq!(strip_pre("<pre>unclosed"), "<pre>unclosed");
    }

    #[test]
    fn test_from_body_error_shapes() {
        match ApiResponse::from_body(403, "denied") {
            Err(ApiError::ServerError { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "denied");
            }
            other => panic!("unexpected: {:?}", other),
        }

        assert!(matches!(
            ApiResponse::from_body(200, r#"{"error": "invalid key"}"#),
            Err(ApiError::Remote(message)) if message == "invalid key"
        ));
        assert!(matches!(
            ApiResponse::from_body(200, r#"{"error": false, "ok": 1}"#),
            Ok(ApiResponse::Json(_))
        ));
    }

    #[test]
    fn test_into_json_rejects_text() {
        let err = ApiResponse::Text("<html>".into()).into_json().unwrap_err();
        assert!(err.to_string().contains("could not parse"), "{err}");
    }

    #[tokio::test]
    async fn test_typed_helpers_build_requests() {
        let api = FakeApi::new();
        api.respond("getAllScripts", Ok(ApiResponse::Json(json!([{"id": 3, "name": "aim"}]))));
        api.respond("getForumPosts", Ok(ApiResponse::Json(json!([{"title": "t", "message": "m"}]))));
        api.respond("getConfiguration", Ok(ApiResponse::Text("{\"a\":1}".into())));

        let scripts = get_all_scripts(&api).await.unwrap();
        assert_eq!(scripts[0].id(), Some(3));

        let posts = get_forum_posts(&api, 10).await.unwrap();
        assert_eq!(posts[0].title, "t");

        assert_eq!(get_configuration(&api).await.unwrap(), "{\"a\":1}");

        set_configuration(&api, "{\"a\":2}").await.unwrap();
        toggle_script_status(&api, 130).await.unwrap();
        let member = get_member(&api, &["scripts", "xp"]).await.unwrap();
        assert_eq!(member, Value::Null);

        let calls = api.calls();
        assert_eq!(calls[1].query, vec![("count".to_string(), "10".to_string())]);
        assert_eq!(calls[3].form, vec![("value".to_string(), "{\"a\":2}".to_string())]);
        assert_eq!(calls[4].query, vec![("id".to_string(), "130".to_string())]);
        assert_eq!(calls[5].query.len(), 2);
    }

    #[tokio::test]
    async fn test_helper_surfaces_unparseable_json() {
        let api = FakeApi::new();
        api.respond("listPerks", Ok(ApiResponse::Text("maintenance".into())));
        assert!(matches!(
            list_perks(&api).await,
            Err(ApiError::InvalidResponse(_))
        ));
    }
}
