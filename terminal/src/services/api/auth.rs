//! # Authentication Endpoint
//!
//! Exchanges email and password for a bearer token.

use shared::{AuthData, LoginEnvelope, LoginRequest};

use super::client::{error_summary, ApiClient, LOGIN_PATH};
use crate::core::{AppError, Result};

/// Login with email and password.
///
/// Any answer other than a 2xx carrying `succeeded: true` and complete
/// session data is an [`AppError::AuthenticationFailed`]. Transport failures
/// are reported as [`AppError::RemoteUnavailable`].
#[tracing::instrument(skip(client, password), fields(email = %email))]
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<AuthData> {
    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    let response = client
        .client
        .post(client.url(LOGIN_PATH))
        .json(&request)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Login network error");
            AppError::from(e)
        })?;

    let status = response.status();
    let duration = start.elapsed();

    if !status.is_success() {
        let reason = error_summary(response)
            .await
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        tracing::warn!(
            status = status.as_u16(),
            error = %reason,
            duration_ms = duration.as_millis(),
            "Login failed"
        );
        return Err(AppError::AuthenticationFailed(reason));
    }

    let envelope = response.json::<LoginEnvelope>().await.map_err(|e| {
        tracing::error!(error = %e, "Login response parse error");
        AppError::AuthenticationFailed(format!("Malformed login response: {}", e))
    })?;

    let message = envelope.message.clone();
    match envelope.into_auth_data() {
        Some(data) => {
            tracing::info!(duration_ms = duration.as_millis(), "Login successful");
            Ok(data)
        }
        None => {
            let reason = message.unwrap_or_else(|| "Login was not accepted".to_string());
            tracing::warn!(error = %reason, duration_ms = duration.as_millis(), "Login rejected");
            Err(AppError::AuthenticationFailed(reason))
        }
    }
}
