//! # Second Brain API Server
//!
//! Serves the bookmarking API on port 3000.
//!
//! ## Startup
//!
//! 1. Load configuration from the environment
//! 2. Connect the PostgreSQL pool and apply migrations
//! 3. Serve until Ctrl-C, then close the pool
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p secondbrain-api
//! ```

use secondbrain_api::{
    app::{build_router, AppState},
    config::Config,
};
use secondbrain_shared::{
    db::{
        migrations::run_migrations,
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    store::PgStore,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "secondbrain_api=debug,secondbrain_shared=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Second Brain API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let pool = create_pool(
        DatabaseConfig::new(config.database.url.clone())
            .with_max_connections(config.database.max_connections),
    )
    .await?;

    run_migrations(&pool).await?;

    let bind_address = config.bind_address();
    let store = Arc::new(PgStore::new(pool));
    let state = AppState::new(store.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(store.pool().clone()).await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
