//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, software-map assembly, service
//! wiring and the Axum server lifecycle.

use crate::application::services::{AuthService, RedirectService, SoftwareService};
use crate::config::Config;
use crate::domain::software_map::SoftwareMap;
use crate::infrastructure::persistence::{PgLinkRepository, PgMetadataRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Software map (built-in table + configured overrides)
/// - Repositories and services
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, an override registration,
/// the bind or the server runtime fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    let software_map = build_software_map(&config)?;
    tracing::info!("Software map ready ({} entries)", software_map.len());

    let pool = Arc::new(pool);
    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
    let metadata_repository = Arc::new(PgMetadataRepository::new(pool.clone()));
    let software_map = Arc::new(software_map);

    let redirect_service = Arc::new(RedirectService::new(
        link_repository.clone(),
        metadata_repository.clone(),
        software_map.clone(),
    ));
    let software_service = Arc::new(SoftwareService::new(
        link_repository.clone(),
        metadata_repository,
        software_map,
    ));
    let auth_service = Arc::new(AuthService::new(
        &config.admin_token,
        &config.token_signing_secret,
    ));
    tracing::debug!(
        token_fingerprint = %auth_service.token_fingerprint(),
        "admin auth ready"
    );

    let state = AppState {
        redirect_service,
        software_service,
        auth_service,
        link_repository,
        log_file: config.log_file.clone(),
    };

    let app = NormalizePathLayer::trim_trailing_slash()
        .layer(app_router(state, config.behind_proxy));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}

/// Builds the software map from the built-in table plus configured overrides.
fn build_software_map(config: &Config) -> Result<SoftwareMap> {
    let mut builder = SoftwareMap::builder();
    for (key, template) in &config.software_overrides {
        builder = builder
            .register(key.clone(), template)
            .with_context(|| format!("invalid SOFTWARE_OVERRIDES entry for '{key}'"))?;
    }
    Ok(builder.build())
}
