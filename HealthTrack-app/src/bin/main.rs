use dotenv::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use healthtrack_app::console::HELP;
use healthtrack_app::{AppConfig, Session};

/// The main entry point for the HealthTrack console host
///
/// This function:
/// 1. Loads environment variables from a .env file
/// 2. Sets up tracing for logging (to stderr, keeping stdout for screens)
/// 3. Reads the configuration
/// 4. Feeds stdin lines to a console session until `quit`, EOF or Ctrl+C
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    // Initialize tracing for structured logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(false)
            .with_ansi(true)
            .with_timer(fmt::time::uptime())
            .with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    let config = AppConfig::from_env()?;
    info!(?config, "Starting HealthTrack console");

    let mut session = Session::new(config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", HELP);

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = shutdown_signal() => None,
        };
        let Some(line) = line else { break };

        match session.handle_line(&line).await {
            Ok(output) => {
                for text in output {
                    println!("{}", text);
                }
            }
            Err(e) => {
                error!("{}", e);
                println!("error: {}", e);
            }
        }

        if session.is_finished() {
            break;
        }
    }

    info!("HealthTrack console closed");
    Ok(())
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}
