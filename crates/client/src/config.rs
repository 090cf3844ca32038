//! Client configuration.
//!
//! The backend location is the only knob. Resolution order: explicit value
//! > `ATELIER_API_BASE` environment variable > localhost default.

/// Environment variable naming the backend base URL.
pub const API_BASE_ENV: &str = "ATELIER_API_BASE";

/// Fallback base URL for local development.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash (e.g. "https://api.example.com").
    pub api_base: String,
}

impl ApiConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        let mut api_base = api_base.into();
        while api_base.ends_with('/') {
            api_base.pop();
        }
        Self { api_base }
    }

    /// Resolve from the environment, falling back to the default.
    pub fn from_env() -> Self {
        match std::env::var(API_BASE_ENV) {
            Ok(base) if !base.trim().is_empty() => Self::new(base.trim()),
            _ => Self::new(DEFAULT_API_BASE),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}
