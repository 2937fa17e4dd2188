//! Service entry-point: loads settings and keys, wires the account service
//! and serves the REST endpoints.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use accounts::config::{AccountSettings, BuildMode, token_keys_from_env};
use accounts::domain::{AuthService, TokenService};
use accounts::inbound::http::health::HealthState;
use accounts::outbound::InMemoryUserRepository;
use server::{ServerConfig, create_server};

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

    let settings = AccountSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let hasher = settings.password_hasher().map_err(std::io::Error::other)?;
    let ttl = settings.token_ttl().map_err(std::io::Error::other)?;

    let loaded = token_keys_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %loaded.fingerprint,
        development = loaded.development,
        "token verification key loaded"
    );

    let tokens = TokenService::new(Arc::new(loaded.keys), Arc::new(DefaultClock))
        .with_issuer(settings.token_issuer())
        .with_ttl(ttl);
    let accounts = AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        hasher,
        Arc::new(tokens),
    );

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, Arc::new(accounts));
    info!(%bind_addr, "starting HTTP server");
    create_server(health_state, config)?.await
}
