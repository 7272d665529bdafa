//! Client configuration

use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Configuration for talking to the orchestration backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Backend root; `/chat` is appended
    pub backend_url: String,
    pub request_timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Self {
        let timeout_secs = std::env::var("BACKEND_TIMEOUT_SECS").ok();
        Self::from_vars(std::env::var("BACKEND_URL").ok(), timeout_secs.as_deref())
    }

    fn from_vars(backend_url: Option<String>, timeout_secs: Option<&str>) -> Self {
        let backend_url = backend_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let request_timeout = match timeout_secs.map(str::parse::<u64>) {
            Some(Ok(secs)) if secs > 0 => Duration::from_secs(secs),
            Some(_) => {
                tracing::warn!(
                    value = ?timeout_secs,
                    "Invalid BACKEND_TIMEOUT_SECS, using default"
                );
                DEFAULT_REQUEST_TIMEOUT
            }
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        Self {
            backend_url,
            request_timeout,
        }
    }

    #[must_use]
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Full URL of the chat endpoint
    pub fn chat_endpoint(&self) -> String {
        format!("{}/chat", self.backend_url.trim_end_matches('/'))
    }
}
