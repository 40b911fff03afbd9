//! # Data Transfer Objects (DTOs)
//!
//! Every request and response body exchanged with the chatbot API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Login request and the `succeeded`/`data` login envelope
//! - [`chat`] - General and book-wise chat requests, the chat envelope and [`chat::BotId`]
//! - [`namespace`] - Book (namespace) listing
//! - [`error`] - Error bodies on non-2xx responses
//!
//! ## Serialization Format
//!
//! - **Field naming**: snake_case, matching the service
//! - **Envelopes**: every payload field is optional on decode; presence is
//!   checked by the `into_*` accessors instead of failing the whole body
//! - **Ids**: user and bot ids are accepted as numbers or strings and kept as
//!   text on the client
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/v1/Gen-chatbot
//! Authorization: Bearer eyJhbGciOi...
//! Content-Type: application/json
//!
//! {
//!   "user_id": "12",
//!   "query": "What is love?",
//!   "bot_id": 0
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "data": {
//!     "response": "Love is patient, love is kind...",
//!     "bot_id": 77
//!   }
//! }
//! ```

pub mod auth;
pub mod chat;
pub mod error;
pub mod namespace;

pub use auth::*;
pub use chat::*;
pub use error::*;
pub use namespace::*;
