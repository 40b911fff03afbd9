//! Trace ids for correlating the log lines of one store operation
//!
//! Each operation gets its own span carrying a fresh uuid. The span is
//! attached to the operation's future, so the id follows it across await
//! points and worker threads.

use tracing::Span;
use uuid::Uuid;

/// Generate a new trace id
pub fn new_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span for one store operation, tagged with a fresh trace id.
///
/// ```rust,ignore
/// use tracing::Instrument;
///
/// async { /* ... */ }
///     .instrument(operation_span("send_message"))
///     .await;
/// ```
pub fn operation_span(operation: &'static str) -> Span {
    tracing::info_span!("session", op = operation, trace_id = %new_trace_id())
}
