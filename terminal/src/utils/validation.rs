//! Validation utilities for user input
//!
//! The front-end checks input before anything is sent: empty credentials and
//! empty questions never reach the service.

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

/// Validate email format: something on each side of a single `@`.
///
/// Anything stricter is left to the service.
pub fn validate_email(email: &str) -> ValidationResult {
    let email = email.trim();
    if email.is_empty() {
        return ValidationResult::err("Email is required");
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return ValidationResult::err("Invalid email format");
    }

    if parts[0].is_empty() {
        return ValidationResult::err("Email username cannot be empty");
    }

    if parts[1].is_empty() {
        return ValidationResult::err("Invalid email domain");
    }

    ValidationResult::ok()
}

/// Password strength is the service's business; only presence is checked here
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::err("Password is required");
    }
    ValidationResult::ok()
}

/// Validate a chat question
pub fn validate_question(question: &str) -> ValidationResult {
    if question.trim().is_empty() {
        return ValidationResult::err("Question cannot be empty");
    }
    ValidationResult::ok()
}
