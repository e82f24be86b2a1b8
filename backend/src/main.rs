//! Service entry-point: wires configuration, persistence and HTTP routes.

use std::sync::Arc;

use actix_web::{HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use blogful::inbound::http::health::HealthState;
use blogful::inbound::http::state::HttpState;
use blogful::outbound::persistence::{DbPool, DieselPostRepository};
use blogful::server::{AppConfig, build_app};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    // An unreachable database is a fatal startup error, not a handled case.
    let pool = DbPool::connect(&config.database_url, config.pool_max_size)
        .await
        .map_err(std::io::Error::other)?;

    let http_state = web::Data::new(HttpState::new(Arc::new(DieselPostRepository::new(pool))));
    let health_state = web::Data::new(HealthState::new());

    info!(
        profile = ?config.profile,
        addr = %config.bind_addr,
        debug = config.debug,
        "starting server"
    );

    let server_http_state = http_state.clone();
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_http_state.clone(), server_health_state.clone())
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
