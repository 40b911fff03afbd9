//! # API Client
//!
//! Main HTTP client for chatbot API communication.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::{AuthData, BookChatRequest, ErrorResponse, GeneralChatRequest};

use crate::config::AppConfig;
use crate::core::service::{ChatReply, ChatService};
use crate::core::{AppError, Result};

pub(crate) const LOGIN_PATH: &str = "/login";
pub(crate) const GENERAL_CHAT_PATH: &str = "/Gen-chatbot";
pub(crate) const NAMESPACES_PATH: &str = "/get_all_namespaces";
pub(crate) const BOOK_CHAT_PATH: &str = "/book-wise-chat";

/// HTTP client for the chatbot API.
///
/// Holds a pooled `reqwest::Client` configured with the request timeout from
/// [`AppConfig`]. Cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    config: AppConfig,
}

impl ApiClient {
    /// Create a client for the configured base URL.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }
}

/// Turn a non-2xx response from an authenticated endpoint into an error.
///
/// 401 means the bearer token is no longer accepted, 422 is a rejected
/// request body; anything else is reported as the service being unavailable.
pub(crate) async fn classify_failure(response: Response) -> AppError {
    let status = response.status();
    let summary = error_summary(response).await;

    match status {
        StatusCode::UNAUTHORIZED => AppError::SessionExpired,
        StatusCode::UNPROCESSABLE_ENTITY => AppError::ValidationFailed(
            summary.unwrap_or_else(|| "request was rejected by the service".to_string()),
        ),
        _ => AppError::RemoteUnavailable(match summary {
            Some(text) => format!("HTTP {}: {}", status.as_u16(), text),
            None => format!("HTTP {}", status.as_u16()),
        }),
    }
}

/// Best-effort extraction of the error text from a failed response body.
pub(crate) async fn error_summary(response: Response) -> Option<String> {
    response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.summary())
}

#[async_trait]
impl ChatService for ApiClient {
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthData> {
        super::auth::login(self, email, password).await
    }

    async fn list_namespaces(&self, token: &str) -> Result<Vec<String>> {
        super::namespaces::get_all_namespaces(self, token).await
    }

    async fn general_chat(&self, token: &str, request: &GeneralChatRequest) -> Result<ChatReply> {
        super::chat::general_chat(self, token, request).await
    }

    async fn book_chat(&self, token: &str, request: &BookChatRequest) -> Result<ChatReply> {
        super::chat::book_chat(self, token, request).await
    }
}
