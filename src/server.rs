//! HTTP server initialization and runtime setup.
//!
//! Wires the connection pool, background tasks, and Axum server lifecycle
//! together, with explicit teardown on shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::mpsc;

use crate::application::{
    ExpirySweeper, RedirectService, ShortenerService, TrackingService, run_click_recorder,
};
use crate::config::Config;
use crate::infrastructure::geo::IpinfoClient;
use crate::infrastructure::persistence::{PgClickRepository, PgMappingRepository};
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes, in order: the PostgreSQL pool, migrations, the background
/// click recorder, the expiry sweeper, and the Axum server. On Ctrl-C the
/// server drains, the sweeper timer is stopped, and the pool is closed.
///
/// # Errors
///
/// Returns an error if the database connection, migration run, or server
/// bind fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let pool = Arc::new(pool);
    let mappings = Arc::new(PgMappingRepository::new(pool.clone()));
    let clicks = Arc::new(PgClickRepository::new(pool.clone()));

    let geo = Arc::new(
        IpinfoClient::new(&config.geo_api_url).context("Failed to build geolocation client")?,
    );

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    let recorder = tokio::spawn(run_click_recorder(click_rx, clicks.clone(), geo));
    tracing::info!("Click recorder started");

    let sweeper = ExpirySweeper::new(
        mappings.clone(),
        clicks.clone(),
        Duration::from_secs(config.sweep_interval_secs),
    )
    .spawn();

    let state = AppState::new(
        Arc::new(ShortenerService::new(mappings.clone())),
        Arc::new(RedirectService::new(mappings)),
        Arc::new(TrackingService::new(clicks)),
        click_tx,
        config.base_url.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // Explicit teardown: stop the timer task, let the recorder drain (its
    // senders died with the router), close the store.
    sweeper.abort();
    let _ = recorder.await;
    pool.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl-C handler");
    }
}
