//! # Core Abstractions
//!
//! Core traits and error types shared by the store, the API client and the UI.
//!
//! - **[`error`]**: Application error type (`AppError`, `Result<T>`)
//! - **[`service`]**: The `ChatService` trait the session store talks through
//!
//! ## Dependency Injection
//!
//! The store only knows the trait, so tests can swap the HTTP client out:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bookchat::core::ChatService;
//!
//! // In production: the reqwest client
//! let api: Arc<dyn ChatService> = Arc::new(bookchat::services::api::ApiClient::new(&config)?);
//!
//! // In tests: a scripted double
//! let api: Arc<dyn ChatService> = Arc::new(ScriptedService::default());
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::{ChatReply, ChatService};
