use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use bookchat::services::api::ApiClient;
use bookchat::{debug, AppConfig, Repl, SessionStore};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let _log_guard = debug::init();

    let config = match AppConfig::from_env().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let api = match ApiClient::new(&config) {
        Ok(api) => api,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(base_url = %api.base_url(), "Starting bookchat");

    let store = SessionStore::new(Arc::new(api));
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut repl = Repl::new(store, stdin, std::io::stdout())
        .hide_password_input(std::io::stdin().is_terminal());

    match repl.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Terminal I/O failed");
            eprintln!("I/O error: {}", err);
            ExitCode::FAILURE
        }
    }
}
