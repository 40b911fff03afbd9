//! # Namespace Endpoint
//!
//! Lists the books available to the book-wise bot.

use shared::NamespaceList;

use super::client::{classify_failure, ApiClient, NAMESPACES_PATH};
use crate::core::{AppError, Result};

/// Fetch all namespace (book) names.
#[tracing::instrument(skip_all)]
pub async fn get_all_namespaces(client: &ApiClient, token: &str) -> Result<Vec<String>> {
    let response = client
        .client
        .get(client.url(NAMESPACES_PATH))
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Namespace list network error");
            AppError::from(e)
        })?;

    let status = response.status();
    if !status.is_success() {
        let err = classify_failure(response).await;
        tracing::warn!(status = status.as_u16(), error = %err, "Namespace list failed");
        return Err(err);
    }

    let names = response
        .json::<NamespaceList>()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Namespace list parse error");
            AppError::EmptyResponse
        })?
        .into_names();

    tracing::debug!(count = names.len(), "Namespaces loaded");
    Ok(names)
}
