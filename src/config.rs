//! Backend address configuration
//!
//! The base address is resolved once at startup and handed to
//! `QuizClient::new` explicitly, so tests and scripts can point the client
//! anywhere without touching the environment.

use crate::constants::{API_URL_ENV, DEFAULT_API_URL};

/// Where the quiz backend lives
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Create a config from an explicit base address
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        ApiConfig { base_url }
    }

    /// Resolve the base address from `WIKIQUIZ_API_URL`, with a localhost fallback
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => ApiConfig::new(url.trim()),
            _ => ApiConfig::new(DEFAULT_API_URL),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_trimmed() {
        let config = ApiConfig::new("http://quiz.example.com/");
        assert_eq!(config.base_url(), "http://quiz.example.com");
    }

    #[test]
    fn test_default_points_at_localhost() {
        assert_eq!(ApiConfig::default().base_url(), DEFAULT_API_URL);
    }
}
