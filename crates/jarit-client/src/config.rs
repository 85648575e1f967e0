//! Client configuration.

/// Environment variable overriding the backend base endpoint.
pub const BASE_URL_ENV: &str = "JARIT_API_BASE";

/// Default backend base endpoint (local development).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Configuration for [`crate::JaritClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read the base URL from `JARIT_API_BASE`, falling back to the default.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }

    /// Override the backend base endpoint.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url_str(&self) -> &str {
        &self.base_url
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
