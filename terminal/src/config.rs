//! Client configuration from environment variables

use std::env;
use std::time::Duration;

use crate::core::{AppError, Result};

/// Base URL of the hosted chatbot API
pub const DEFAULT_API_URL: &str = "https://biblegpt-be-ai.xeventechnologies.com/api/v1";

/// Inference calls routinely take tens of seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const MAX_TIMEOUT_SECS: u64 = 600;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// API base URL without trailing slash
    pub api_base_url: String,
    /// Per-request timeout applied by the HTTP client
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Read `BOOKCHAT_API_URL` and `BOOKCHAT_TIMEOUT_SECS`, falling back to
    /// the defaults when unset.
    pub fn from_env() -> Result<Self> {
        let api_base_url = env::var("BOOKCHAT_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs = match env::var("BOOKCHAT_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config("BOOKCHAT_TIMEOUT_SECS must be a whole number of seconds".to_string())
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::new(api_base_url, Duration::from_secs(timeout_secs)))
    }

    pub fn new(api_base_url: impl Into<String>, request_timeout: Duration) -> Self {
        let api_base_url = api_base_url.into().trim().trim_end_matches('/').to_string();
        Self {
            api_base_url,
            request_timeout,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "BOOKCHAT_API_URL must start with http:// or https:// (got '{}')",
                self.api_base_url
            )));
        }

        let secs = self.request_timeout.as_secs();
        if secs == 0 || secs > MAX_TIMEOUT_SECS {
            return Err(AppError::Config(format!(
                "BOOKCHAT_TIMEOUT_SECS must be between 1 and {}",
                MAX_TIMEOUT_SECS
            )));
        }

        Ok(())
    }

    /// Full URL for an endpoint path such as `/login`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}
