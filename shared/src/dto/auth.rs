use serde::{Deserialize, Serialize};

use crate::utils::string_or_number;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response envelope.
///
/// The service answers `200 OK` even for some rejected logins, so
/// `succeeded` has to be checked before `data` is trusted. A missing
/// `succeeded` field counts as a failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginEnvelope {
    #[serde(default)]
    pub succeeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AuthData>,
}

impl LoginEnvelope {
    /// Returns the session data only when the envelope reports success
    /// and carries a complete payload.
    pub fn into_auth_data(self) -> Option<AuthData> {
        if !self.succeeded {
            return None;
        }
        self.data.filter(AuthData::is_complete)
    }
}

/// Session data returned by a successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthData {
    pub token: String,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub email: String,
}

impl AuthData {
    /// A token and user id are required for every follow-up call.
    pub fn is_complete(&self) -> bool {
        !self.token.is_empty() && !self.user_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_envelope_success() {
        let body = r#"{
            "succeeded": true,
            "message": "ok",
            "data": {"token": "T", "user_id": 41, "email": "a@b.co"}
        }"#;
        let envelope: LoginEnvelope = serde_json::from_str(body).unwrap();
        let data = envelope.into_auth_data().unwrap();
        assert_eq!(data.token, "T");
        assert_eq!(data.user_id, "41");
        assert_eq!(data.email, "a@b.co");
    }

    #[test]
    fn test_login_envelope_not_succeeded() {
        let body = r#"{"succeeded": false, "message": "Invalid credentials"}"#;
        let envelope: LoginEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.message.as_deref(), Some("Invalid credentials"));
        assert!(envelope.into_auth_data().is_none());
    }

    #[test]
    fn test_login_envelope_missing_succeeded_is_failure() {
        let body = r#"{"data": {"token": "T", "user_id": "U1", "email": "a@b.co"}}"#;
        let envelope: LoginEnvelope = serde_json::from_str(body).unwrap();
        assert!(envelope.into_auth_data().is_none());
    }

    #[test]
    fn test_login_envelope_empty_token_is_failure() {
        let body = r#"{"succeeded": true, "data": {"token": "", "user_id": "U1", "email": "a@b.co"}}"#;
        let envelope: LoginEnvelope = serde_json::from_str(body).unwrap();
        assert!(envelope.into_auth_data().is_none());
    }
}
