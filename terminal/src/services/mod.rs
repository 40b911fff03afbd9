//! # Services Module
//!
//! External service integrations for the chat client.
//!
//! ## Module Overview
//!
//! ```text
//! services/
//! └── api/    - Chatbot HTTP API client
//!               (login, namespaces, general chat, book-wise chat)
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                bookchat                      │
//! │                                              │
//! │  ┌──────────────┐       ┌────────────────┐   │
//! │  │ SessionStore │──────▶│  ApiClient     │   │
//! │  │ (app)        │ trait │  (api/)        │   │
//! │  └──────────────┘       └───────┬────────┘   │
//! └─────────────────────────────────┼────────────┘
//!                                   │ HTTPS/JSON, bearer token
//!                                   ▼
//!                  ┌────────────────────────────────┐
//!                  │  Chatbot API                   │
//!                  │  /login                        │
//!                  │  /get_all_namespaces           │
//!                  │  /Gen-chatbot                  │
//!                  │  /book-wise-chat               │
//!                  └────────────────────────────────┘
//! ```
//!
//! The store never touches `ApiClient` directly; it holds an
//! `Arc<dyn ChatService>` (see [`crate::core::service`]).

pub mod api;
