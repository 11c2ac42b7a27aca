use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use climate_chart::chart::ChartController;
use climate_chart::common::AppState;
use climate_chart::config::Config;
use climate_chart::routes;
use climate_chart::services::{build_cache, CachedSource};
use climate_chart::source::DataClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,climate_chart=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting climate-chart...");

    // Load configuration (fail-fast)
    let config = Config::from_env()?;
    let layout = config.layout()?;
    tracing::info!(
        deployment = ?config.deployment,
        data_base_url = %config.data_base_url,
        debug = config.debug_mode,
        host = %config.api_host,
        port = config.api_port,
        "Configuration loaded"
    );

    // Data endpoint client, with windowed fetches cached
    let client = DataClient::new(&config)?;
    let cache = build_cache(
        Duration::from_secs(config.cache_ttl_seconds),
        config.cache_max_entries,
    );
    let source = CachedSource::new(client, cache);

    // Draw the chart once before serving; a failed fetch aborts startup
    let mut controller = ChartController::new(source, layout, config.debug_mode);
    controller.initial_load().await?;

    let state = AppState::new(config.clone(), controller);
    let app = routes::build_router(state);

    // Start server with graceful shutdown
    let addr = config.bind_address();
    tracing::info!(address = %addr, "Starting server");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        },
    }
}
