//! # Debugging and Tracing Infrastructure
//!
//! File-based structured logging for the chat client.
//!
//! ## Features
//!
//! - **File-based logging**: Structured logs to `logs/bookchat.log` (daily rotation)
//! - **Trace ids**: Every session operation runs in a span with its own uuid
//! - **Stderr mirror**: Optional, for watching a session live
//!
//! ## Usage
//!
//! ```rust,ignore
//! // Initialize at app startup and keep the guard alive
//! let _guard = debug::init();
//!
//! // Log with structured fields
//! tracing::info!(endpoint = "/Gen-chatbot", duration_ms = 234, "API call completed");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `bookchat=debug,info`)
//! - `BOOKCHAT_LOG_DIR`: Log directory (default: `logs`)
//! - `BOOKCHAT_LOG_STDERR`: Mirror logs to stderr (1=on, 0=off)

pub mod config;
pub mod logger;
pub mod trace_context;

pub use config::DebugConfig;
pub use logger::init as init_logger;
pub use trace_context::{new_trace_id, operation_span};

use tracing_appender::non_blocking::WorkerGuard;

/// Initialize logging from the environment.
///
/// Call this at application startup, before any other operations.
pub fn init() -> Option<WorkerGuard> {
    init_logger(&DebugConfig::from_env())
}
