//! # BookChat - Library Root
//!
//! A terminal chat client for a remote chatbot service with two bots: a
//! general-purpose one and one scoped to a single book. This library crate
//! contains all modules used by the binary crate (`main.rs`).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              bookchat (this crate)                     │
//! ├────────────────────────────────────────────────────────┤
//! │  ui        - Line-oriented prompt over stdin/stdout    │
//! │  app       - SessionStore: credentials + conversations │
//! │  services  - Reqwest client for the chatbot API        │
//! │  core      - AppError, ChatService trait               │
//! │  debug     - tracing setup, trace ids                  │
//! └────────────────────────────────────────────────────────┘
//!          │
//!          │ HTTPS/JSON (bearer token)
//!          ▼
//! ┌──────────────────────────────┐
//! │  Chatbot API                 │
//! │  login, namespaces, chat     │
//! └──────────────────────────────┘
//! ```
//!
//! ## Module Dependency Graph
//!
//! ```text
//! main.rs
//!   │
//!   ├── config (AppConfig from env)
//!   ├── debug (logging)
//!   └── ui::Repl
//!         └── app::SessionStore
//!               └── core::ChatService ◀── services::api::ApiClient
//! ```
//!
//! ## Core Concepts
//!
//! ### Session State
//!
//! [`SessionStore`] is an ordinary struct owned by the caller. Its operations
//! take `&mut self` and only mutate after the remote call has resolved, so a
//! failed call never leaves a half-recorded exchange behind.
//!
//! ### Bot Ids
//!
//! The service files every conversation under a bot id it assigns on the
//! first answer and may change later. The store moves general-chat history
//! to the new id and tracks per-book ids alongside each book's history.
//!
//! ## Usage
//!
//! ```bash
//! BOOKCHAT_API_URL=http://localhost:8000/api/v1 cargo run --bin bookchat
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --workspace
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod ui;
pub mod utils;

pub use crate::app::{ChatMode, Message, Scope, SessionStore};
pub use crate::config::AppConfig;
pub use crate::core::{AppError, Result};
pub use crate::ui::Repl;
