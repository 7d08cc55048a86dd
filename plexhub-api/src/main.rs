use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use plexhub_api::{create_router, AppState};
use plexhub_core::{logging, Config, ServerAggregator};
use plexhub_providers::PlexClient;
use tracing::{error, info, warn};

/// Aggregate Plex libraries across servers over HTTP
#[derive(Debug, Parser)]
#[command(name = "plexhub", version, about)]
struct Cli {
    /// Config file (TOML, YAML or JSON)
    #[arg(short, long, env = "PLEXHUB_CONFIG_PATH", default_value = "plexhub.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration
    let config = Config::load(Some(&cli.config))
        .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", cli.config))?;

    // 2. Validate configuration (fail fast on misconfigurations)
    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("Config validation error: {e}");
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s)",
            errors.len()
        ));
    }

    // 3. Initialize logging
    logging::init_logging(&config.logging)?;
    info!("plexhub starting...");
    info!("HTTP address: {}", config.http_address());

    // 4. Resolve the active server set
    let backends = config.active_backends();
    if backends.is_empty() {
        warn!("No usable servers configured; every directory request will fail");
    }
    for backend in &backends {
        info!(server = %backend.name, url = %backend.base_url, "Server configured");
    }

    // 5. Build services
    let client = PlexClient::with_timeout(config.plex_timeout())?;
    let aggregator = ServerAggregator::with_client(Arc::new(client));
    let router = create_router(AppState::new(aggregator, backends));

    // 6. Serve until a shutdown signal arrives
    let listener = tokio::net::TcpListener::bind(config.http_address())
        .await
        .map_err(|e| {
            error!("Failed to bind HTTP address {}: {}", config.http_address(), e);
            anyhow::anyhow!("Bind failed: {e}")
        })?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server shut down gracefully");
    Ok(())
}

/// Wait for a shutdown signal (SIGTERM or SIGINT/Ctrl+C)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("Received Ctrl+C"); }
        () = terminate => { info!("Received SIGTERM"); }
    }
}
