//! # Service Traits
//!
//! The seam between the session store and the remote chatbot API.

use async_trait::async_trait;
use shared::{AuthData, BookChatRequest, BotId, GeneralChatRequest};

use super::error::Result;

/// A decoded chat answer: the bot's text and the conversation id the service
/// filed it under. An unassigned `bot_id` means the service did not report one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub response: String,
    pub bot_id: BotId,
}

/// Remote API operations used by [`crate::app::SessionStore`].
///
/// Implementations decode and classify responses before returning, so every
/// `Err` is already one of the [`crate::core::AppError`] variants and every
/// `Ok` carries validated data. The production implementation is
/// [`crate::services::api::ApiClient`]; tests supply scripted doubles.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Exchange email and password for session data.
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthData>;

    /// Names of the books the book-wise bot knows about.
    async fn list_namespaces(&self, token: &str) -> Result<Vec<String>>;

    /// Ask the general bot.
    async fn general_chat(&self, token: &str, request: &GeneralChatRequest) -> Result<ChatReply>;

    /// Ask the bot scoped to one book.
    async fn book_chat(&self, token: &str, request: &BookChatRequest) -> Result<ChatReply>;
}
