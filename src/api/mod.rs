//! REST API Access
//!
//! Thin wrappers over the browser `fetch` API, organized by concern:
//! transport (this file), query keys and cache, auth endpoints and
//! resource CRUD.

mod auth;
mod query;
mod resource;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::config::AppConfig;
use crate::session::SessionContext;

// Re-export all public items
pub use auth::*;
pub use query::*;
pub use resource::*;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("no browser window available")]
    NoWindow,
    #[error("network error: {0}")]
    Network(String),
    #[error("session expired, please sign in again")]
    Unauthorized,
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl From<JsValue> for ApiError {
    fn from(value: JsValue) -> Self {
        let message = value
            .dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.message()))
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{:?}", value));
        Self::Network(message)
    }
}

/// Pull a human readable message out of an error response body.
/// Accepts `{"message": ..}`, `{"error": ..}` or plain text.
pub fn error_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["message", "error", "detail"] {
            if let Some(msg) = json.get(field).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    if body.is_empty() || body.starts_with('{') || body.starts_with('<') {
        return format!("HTTP {}", status);
    }
    body.to_string()
}

/// HTTP client bound to a base URL and optional bearer token
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
        }
    }

    /// Client for the configured API using the current session token.
    /// Call at request time so a fresh token is picked up.
    pub fn for_session(config: &AppConfig, session: &SessionContext) -> Self {
        Self::new(config.api_base_url.clone(), session.token_untracked())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send("GET", path, None).await?;
        decode(response).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let response = self.send("POST", path, Some(encode(body)?)).await?;
        decode(response).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let response = self.send("PUT", path, Some(encode(body)?)).await?;
        decode(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send("DELETE", path, None).await?;
        Ok(())
    }

    async fn send(&self, method: &str, path: &str, body: Option<String>) -> Result<Response, ApiError> {
        let window = web_sys::window().ok_or(ApiError::NoWindow)?;
        let url = self.url(path);

        let init = RequestInit::new();
        init.set_method(method);
        init.set_mode(RequestMode::Cors);
        if let Some(body) = &body {
            init.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&url, &init)?;
        let headers = request.headers();
        headers.set("Accept", "application/json")?;
        if body.is_some() {
            headers.set("Content-Type", "application/json")?;
        }
        if let Some(token) = &self.token {
            headers.set("Authorization", &format!("Bearer {}", token))?;
        }

        web_sys::console::log_1(&format!("[API] {} {}", method, url).into());
        let response: Response = JsFuture::from(window.fetch_with_request(&request)).await?.dyn_into()?;

        match response.status() {
            200..=299 => Ok(response),
            401 => {
                web_sys::console::error_1(&format!("[API] {} {} -> 401", method, url).into());
                Err(ApiError::Unauthorized)
            }
            status => {
                let body = read_text(&response).await.unwrap_or_default();
                let message = error_message(status, &body);
                web_sys::console::error_1(&format!("[API] {} {} -> {}: {}", method, url, status, message).into());
                Err(ApiError::Status { status, message })
            }
        }
    }
}

fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))
}

async fn read_text(response: &Response) -> Result<String, ApiError> {
    let text = JsFuture::from(response.text()?).await?;
    Ok(text.as_string().unwrap_or_default())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let value = JsFuture::from(response.json()?).await?;
    serde_wasm_bindgen::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_json_fields() {
        assert_eq!(error_message(400, r#"{"message":"code already exists"}"#), "code already exists");
        assert_eq!(error_message(409, r#"{"error":"conflict"}"#), "conflict");
        assert_eq!(error_message(422, r#"{"errors":[]}"#), "HTTP 422");
    }

    #[test]
    fn error_message_falls_back_to_text() {
        assert_eq!(error_message(500, "database unavailable\n"), "database unavailable");
        assert_eq!(error_message(502, ""), "HTTP 502");
        assert_eq!(error_message(502, "<html>Bad Gateway</html>"), "HTTP 502");
    }

    #[test]
    fn client_joins_urls() {
        let client = ApiClient::new("https://hr.gov.example/api/", None);
        assert_eq!(client.url("/ministries?q=fin"), "https://hr.gov.example/api/ministries?q=fin");
    }

    #[test]
    fn unauthorized_message() {
        assert_eq!(ApiError::Unauthorized.to_string(), "session expired, please sign in again");
        let err = ApiError::Status { status: 404, message: "not found".to_string() };
        assert_eq!(err.to_string(), "request failed (404): not found");
    }
}
