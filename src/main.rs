use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use formsink::config::{self, Config};
use formsink::db;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Load config
    let config = Config::from_env().expect("Failed to load configuration");

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::info!("Starting Formsink");

    // Lazy pool: connections are opened on first use, and re-opened per
    // acquire after the store drops them.
    let pool = MySqlPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy_with(config.connect_options());

    match db::submissions::ensure_schema(&pool).await {
        Ok(()) => tracing::info!("Table 'submissions' ensured"),
        Err(err) if db::is_connectivity_error(&err) => {
            // The store may simply not be up yet. Keep serving; inserts
            // fail individually until it becomes reachable.
            tracing::error!("Error connecting to MySQL: {err}");
        }
        // The store is reachable but rejected the schema statement.
        Err(err) => return Err(err.into()),
    }

    let app = formsink::build_app(pool, config);

    let listener = tokio::net::TcpListener::bind(config::LISTEN_ADDR).await?;
    tracing::info!("Listening on {}", config::LISTEN_ADDR);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
