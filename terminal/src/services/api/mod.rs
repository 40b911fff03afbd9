//! # Chatbot API Client Module
//!
//! HTTP client for the remote chatbot service. Handles authentication,
//! namespace listing, and the two chat endpoints.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs        - Module exports and documentation
//! ├── client.rs     - ApiClient struct, ChatService impl, status classification
//! ├── auth.rs       - POST /login
//! ├── namespaces.rs - GET /get_all_namespaces
//! └── chat.rs       - POST /Gen-chatbot, POST /book-wise-chat
//! ```
//!
//! ## Status Classification
//!
//! | Status | Login | Authenticated calls |
//! |---|---|---|
//! | 2xx, usable body | session data | reply / names |
//! | 2xx, unusable body | `AuthenticationFailed` | `EmptyResponse` |
//! | 401 | `AuthenticationFailed` | `SessionExpired` |
//! | 422 | `AuthenticationFailed` | `ValidationFailed` |
//! | other | `AuthenticationFailed` | `RemoteUnavailable` |
//! | transport error | `RemoteUnavailable` | `RemoteUnavailable` |

pub mod auth;
pub mod chat;
pub mod client;
pub mod namespaces;

pub use client::ApiClient;
