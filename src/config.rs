use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";
pub const DEFAULT_API_PATH: &str = "/api/presentations/style-from-prompt";

/// Runtime settings, read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub api_path: String,
    /// Raw `Cookie` header value for the service's session, if any.
    pub session_cookie: Option<String>,
    /// `None` means a request may hang for as long as the server does.
    pub request_timeout: Option<Duration>,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
            session_cookie: None,
            request_timeout: None,
            color: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let request_timeout = non_empty("STYLE_REQUEST_TIMEOUT_SECS").and_then(|v| match v.parse::<u64>() {
            Ok(0) => None,
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                tracing::warn!("Ignoring invalid STYLE_REQUEST_TIMEOUT_SECS={}", v);
                None
            }
        });

        Self {
            api_base: non_empty("STYLE_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            api_path: non_empty("STYLE_API_PATH")
                .map(|v| if v.starts_with('/') { v } else { format!("/{v}") })
                .unwrap_or(defaults.api_path),
            session_cookie: non_empty("STYLE_SESSION_COOKIE"),
            request_timeout,
            color: lookup("NO_COLOR").is_none(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.api_base, self.api_path)
    }
}
