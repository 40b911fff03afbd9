//! File-based logging initialization

use super::config::{DebugConfig, LOG_FILE_NAME};
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing::Subscriber;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the logging system
///
/// Sets up:
/// - Daily-rotated log file in `config.log_dir`
/// - Non-blocking writes so logging never stalls the prompt
/// - Optional stderr mirror (`BOOKCHAT_LOG_STDERR=1`)
/// - Span close events with timings when the filter asks for debug output
///
/// The returned guard flushes pending log lines when dropped; keep it alive
/// in `main`. Returns `None` when the log directory cannot be created, in
/// which case only the stderr layer (if enabled) is installed.
pub fn init(config: &DebugConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("bookchat=info,warn"));

    if let Err(e) = fs::create_dir_all(&config.log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer(config.log_to_stderr))
            .try_init();
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events(config))
        .with_ansi(false); // No ANSI codes in log files

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer(config.log_to_stderr))
        .try_init();

    if installed.is_err() {
        eprintln!("Warning: A tracing subscriber was already installed");
    }

    tracing::info!(
        log_file = %config.log_file().display(),
        log_level = %config.log_level,
        stderr = config.log_to_stderr,
        "Logging initialized"
    );

    Some(guard)
}

/// Close events carry `time.busy`/`time.idle` for each instrumented call
fn span_events(config: &DebugConfig) -> FmtSpan {
    if config.is_debug_enabled() {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

/// Compact stderr layer, present only when enabled
fn stderr_layer<S>(enabled: bool) -> Option<Box<dyn Layer<S> + Send + Sync>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    enabled.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact()
            .boxed()
    })
}
