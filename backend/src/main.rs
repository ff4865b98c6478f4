//! Binary entry-point: loads settings, prepares the store and serves the API.

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use yatube_api::inbound::http::health::HealthState;
use yatube_api::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use yatube_api::server::{ServerConfig, create_server};
use yatube_api::startup::{AppSettings, load_seed_file};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let bind_addr = settings.bind_addr().wrap_err("invalid listen address")?;
    let mut config = ServerConfig::new(bind_addr);

    if let Some(database_url) = settings.database_url.as_deref() {
        run_pending_migrations(database_url).await?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
        )
        .await?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database configured; using the in-memory store");
    }

    if let Some(path) = settings.seed_path.as_deref() {
        config = config.with_seed(load_seed_file(path)?);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(yatube_api::server::make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    info!(%bind_addr, "listening");
    server.await?;
    Ok(())
}
