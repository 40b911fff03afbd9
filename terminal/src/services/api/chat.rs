//! # Chat Endpoints
//!
//! General and book-wise chatbot calls. Both endpoints share the request
//! plumbing and the `{data: {response, bot_id}}` answer shape.

use serde::Serialize;
use shared::{BookChatRequest, ChatEnvelope, GeneralChatRequest};

use super::client::{classify_failure, ApiClient, BOOK_CHAT_PATH, GENERAL_CHAT_PATH};
use crate::core::service::ChatReply;
use crate::core::{AppError, Result};

/// Ask the general bot.
#[tracing::instrument(skip_all, fields(bot_id = %request.bot_id))]
pub async fn general_chat(
    client: &ApiClient,
    token: &str,
    request: &GeneralChatRequest,
) -> Result<ChatReply> {
    post_chat(client, GENERAL_CHAT_PATH, token, request).await
}

/// Ask the bot scoped to `request.book_name`.
#[tracing::instrument(skip_all, fields(bot_id = %request.bot_id, book = %request.book_name))]
pub async fn book_chat(
    client: &ApiClient,
    token: &str,
    request: &BookChatRequest,
) -> Result<ChatReply> {
    post_chat(client, BOOK_CHAT_PATH, token, request).await
}

async fn post_chat<T: Serialize + ?Sized>(
    client: &ApiClient,
    path: &str,
    token: &str,
    body: &T,
) -> Result<ChatReply> {
    tracing::debug!(endpoint = path, "Sending chat request");
    let start = std::time::Instant::now();

    let response = client
        .client
        .post(client.url(path))
        .bearer_auth(token)
        .json(body)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(endpoint = path, error = %e, "Chat network error");
            AppError::from(e)
        })?;

    let status = response.status();
    let duration = start.elapsed();

    if !status.is_success() {
        let err = classify_failure(response).await;
        tracing::warn!(
            endpoint = path,
            status = status.as_u16(),
            error = %err,
            duration_ms = duration.as_millis(),
            "Chat request failed"
        );
        return Err(err);
    }

    let envelope = response.json::<ChatEnvelope>().await.map_err(|e| {
        tracing::error!(endpoint = path, error = %e, "Chat response parse error");
        AppError::EmptyResponse
    })?;

    let (response, bot_id) = envelope.into_reply().ok_or_else(|| {
        tracing::warn!(endpoint = path, "Chat response carried no answer");
        AppError::EmptyResponse
    })?;

    tracing::info!(
        endpoint = path,
        bot_id = %bot_id,
        response_len = response.len(),
        duration_ms = duration.as_millis(),
        "Chat response received"
    );

    Ok(ChatReply { response, bot_id })
}
