//! MusikkMeta UI (mkm-ui) - Main entry point
//!
//! Composition root: read configuration, select the data source, inject it
//! into the router (or run a one-off search from the command line).

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use mkm_common::{select_data_source, AppConfig};
use mkm_ui::cli::{run_search, Cli, Command};
use mkm_ui::{build_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr so `search` output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mkm_ui=info,mkm_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting MusikkMeta UI (mkm-ui) v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    let config = AppConfig::load(&cli.settings.overrides(), cli.config.as_deref())
        .context("Failed to load configuration")?;
    config.log_summary();

    let source = select_data_source(&config)
        .await
        .context("Failed to construct data source")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            serve(&config, AppState::new(source)).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Search(args) => match run_search(source.as_ref(), &args).await {
            Ok(table) => {
                println!("{}", table);
                Ok(ExitCode::SUCCESS)
            }
            Err(detail) => {
                eprintln!("Search failed: {}", detail);
                Ok(ExitCode::FAILURE)
            }
        },
    }
}

async fn serve(config: &AppConfig, state: AppState) -> Result<()> {
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("mkm-ui listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
