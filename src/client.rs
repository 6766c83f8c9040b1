use async_trait::async_trait;
use reqwest::{Client, header::{HeaderMap, HeaderValue, COOKIE}};
use thiserror::Error;
use tracing::{info, error, debug};
use uuid::Uuid;

use crate::{config::Config, models::{StyleRequest, StyleResponse, StyleResult}};

#[derive(Debug, Error)]
pub enum StyleError {
    /// The service answered but refused the prompt.
    #[error("{0}")] Rejected(String),
    #[error("HTTP error: {0}")] Http(String),
    #[error("invalid response: {0}")] Decode(String),
}

impl StyleError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            StyleError::Rejected(msg) => msg.clone(),
            StyleError::Http(msg) => format!("Network error: {}", msg),
            other => format!("Network error: {}", other),
        }
    }
}

/// Anything that can turn a prompt into a style.
#[async_trait]
pub trait StyleService: Send + Sync {
    async fn generate_style(&self, prompt: &str) -> Result<StyleResult, StyleError>;
}

pub struct StyleClient {
    client: Client,
    endpoint: String,
}

// Keep logged bodies readable when the service sends back something huge.
fn preview(body: &str, max: usize) -> String {
    if body.len() <= max {
        return body.to_string();
    }
    let mut end = max;
    while !body.is_char_boundary(end) { end -= 1; }
    format!("{}...[{} bytes total]", &body[..end], body.len())
}

impl StyleClient {
    pub fn new(config: &Config) -> Result<Self, StyleError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| StyleError::Http(format!("invalid session cookie: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let mut builder = Client::builder()
            .cookie_store(true)
            .default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| StyleError::Http(e.to_string()))?;

        Ok(Self { client, endpoint: config.endpoint() })
    }

    pub fn endpoint(&self) -> &str { &self.endpoint }
}

/// Interpret a response body. The envelope is honored whatever the status
/// code; an undecodable body is a transport problem on non-2xx and a decode
/// problem otherwise.
pub(crate) fn decode_response(status: reqwest::StatusCode, body: &str) -> Result<StyleResult, StyleError> {
    let envelope: StyleResponse = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(StyleError::Http(format!("status={} body={}", status, preview(body, 200))));
        }
        Err(e) => return Err(StyleError::Decode(e.to_string())),
    };

    if !envelope.success {
        let msg = envelope.error
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| "Failed to generate style".to_string());
        return Err(StyleError::Rejected(msg));
    }

    let style = envelope.style.ok_or_else(|| StyleError::Decode("missing style".into()))?;
    serde_json::from_value(style).map_err(|e| StyleError::Decode(format!("style: {}", e)))
}

#[async_trait]
impl StyleService for StyleClient {
    async fn generate_style(&self, prompt: &str) -> Result<StyleResult, StyleError> {
        let request_id = Uuid::new_v4();
        info!(%request_id, "🎨 Requesting style from {}", self.endpoint);
        debug!(%request_id, "📤 Prompt: {}", preview(prompt, 120));

        let response = self.client
            .post(&self.endpoint)
            .json(&StyleRequest { prompt: prompt.to_string() })
            .send()
            .await
            .map_err(|e| {
                error!(%request_id, "❌ Style request failed: {}", e);
                StyleError::Http(e.to_string())
            })?;

        let status = response.status();
        info!(%request_id, "📥 Response status: {}", status);

        let body = response.text().await.map_err(|e| StyleError::Http(e.to_string()))?;
        debug!(%request_id, "📥 Raw style response: {}", preview(&body, 1000));

        match decode_response(status, &body) {
            Ok(style) => {
                info!(%request_id, "✅ Received theme '{}'", style.theme_name);
                Ok(style)
            }
            Err(e) => {
                error!(%request_id, "❌ Style generation failed: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_style;
    use axum::{Json, Router, routing::post, http::{HeaderMap as AxumHeaders, StatusCode}};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    async fn spawn(app: Router) -> Config {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap(); });
        Config { api_base: format!("http://{}", addr), ..Config::default() }
    }

    fn route(handler: axum::routing::MethodRouter) -> Router {
        Router::new().route(crate::config::DEFAULT_API_PATH, handler)
    }

    #[tokio::test]
    async fn posts_prompt_and_decodes_style() {
        let app = route(post(|Json(body): Json<StyleRequest>| async move {
            let mut style = sample_style();
            style.theme_name = format!("For: {}", body.prompt);
            Json(json!({ "success": true, "style": style }))
        }));
        let client = StyleClient::new(&spawn(app).await).unwrap();

        let style = client.generate_style("calm blue").await.unwrap();
        assert_eq!(style.theme_name, "For: calm blue");
        assert_eq!(style.primary_color, sample_style().primary_color);
    }

    #[tokio::test]
    async fn application_failure_carries_server_message() {
        let app = route(post(|| async {
            (StatusCode::BAD_REQUEST, Json(json!({ "success": false, "error": "Prompt too vague" })))
        }));
        let client = StyleClient::new(&spawn(app).await).unwrap();

        let err = client.generate_style("x").await.unwrap_err();
        assert!(matches!(err, StyleError::Rejected(ref m) if m == "Prompt too vague"));
        assert_eq!(err.user_message(), "Prompt too vague");
    }

    #[tokio::test]
    async fn failure_without_message_uses_fallback() {
        let app = route(post(|| async { Json(json!({ "success": false })) }));
        let client = StyleClient::new(&spawn(app).await).unwrap();

        let err = client.generate_style("x").await.unwrap_err();
        assert_eq!(err.user_message(), "Failed to generate style");
    }

    #[tokio::test]
    async fn session_cookie_is_sent() {
        let app = route(post(|headers: AxumHeaders| async move {
            let cookie = headers.get("cookie").and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
            if cookie.contains("session=abc") {
                Json(json!({ "success": true, "style": sample_style() }))
            } else {
                Json(json!({ "success": false, "error": "Not logged in" }))
            }
        }));
        let mut config = spawn(app).await;
        config.session_cookie = Some("session=abc".into());
        let client = StyleClient::new(&config).unwrap();

        assert!(client.generate_style("x").await.is_ok());
    }

    #[tokio::test]
    async fn html_error_page_is_a_transport_error() {
        let app = route(post(|| async { (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") }));
        let client = StyleClient::new(&spawn(app).await).unwrap();

        let err = client.generate_style("x").await.unwrap_err();
        assert!(matches!(err, StyleError::Http(_)));
        assert_eq!(err.user_message(), "Network error: status=502 Bad Gateway body=<html>bad gateway</html>");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let config = Config { api_base: format!("http://{}", addr), ..Config::default() };
        let client = StyleClient::new(&config).unwrap();

        let err = client.generate_style("x").await.unwrap_err();
        assert!(matches!(err, StyleError::Http(_)));
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let err = decode_response(reqwest::StatusCode::OK, "{not json").unwrap_err();
        assert!(matches!(err, StyleError::Decode(_)));
        assert!(err.user_message().starts_with("Network error: invalid response"));
    }

    #[test]
    fn success_with_incomplete_style_is_a_decode_error() {
        let mut style: Value = serde_json::to_value(sample_style()).unwrap();
        style.as_object_mut().unwrap().remove("title_font");
        let body = json!({ "success": true, "style": style }).to_string();
        assert!(matches!(decode_response(reqwest::StatusCode::OK, &body), Err(StyleError::Decode(_))));

        let body = json!({ "success": true }).to_string();
        assert!(matches!(decode_response(reqwest::StatusCode::OK, &body), Err(StyleError::Decode(_))));
    }

    #[test]
    fn transport_message_has_single_prefix() {
        let err = StyleError::Http("connection refused".into());
        assert_eq!(err.user_message(), "Network error: connection refused");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("ééé", 3), "é...[6 bytes total]");
    }
}
