//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the chat client and the remote
//! chatbot API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Login
//!   - **[`dto::chat`]**: General and book-wise chat
//!   - **[`dto::namespace`]**: Book listing
//!   - **[`dto::error`]**: Error bodies
//! - **[`utils`]**: Serde helpers for loosely typed fields
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shared::dto::auth::{LoginEnvelope, LoginRequest};
//!
//! # async fn demo() -> Result<(), reqwest::Error> {
//! let request = LoginRequest {
//!     email: "alice@example.com".to_string(),
//!     password: "secret".to_string(),
//! };
//!
//! let envelope: LoginEnvelope = reqwest::Client::new()
//!     .post("https://api.example.com/api/v1/login")
//!     .json(&request)
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//!
//! if let Some(auth) = envelope.into_auth_data() {
//!     println!("logged in as {}", auth.email);
//! }
//! # Ok(())
//! # }
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where all exports are public API
pub use dto::*;
pub use utils::*;
