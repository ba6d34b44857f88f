use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use burrow_core::config::{data_dir_from_env_value, store_backend_from_env_value};
use burrow_core::{CoreConfig, Stores};

/// Main entry point for the burrow application
///
/// Resolves configuration from the environment once, opens the document stores and serves the
/// REST API (with Swagger UI at `/swagger-ui`) until interrupted.
///
/// # Environment Variables
/// - `BURROW_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `BURROW_STORE`: `memory` or `file` (default: "memory")
/// - `BURROW_DATA_DIR`: Directory for the file store (default: "burrow_data")
///
/// # Errors
/// Returns an error if:
/// - the logging configuration cannot be initialised,
/// - a configuration value is invalid or the data directory cannot be created,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("burrow=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("BURROW_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let cfg = CoreConfig::new(
        store_backend_from_env_value(std::env::var("BURROW_STORE").ok())?,
        data_dir_from_env_value(std::env::var("BURROW_DATA_DIR").ok()),
    )?;

    let stores = Stores::open(&cfg)?;
    tracing::info!("++ Using {} store ({:?})", cfg.store_backend(), stores);
    tracing::info!("++ Starting burrow REST on {}", rest_addr);

    let app = router(AppState::new(&stores));
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- burrow REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", e);
    }
}
