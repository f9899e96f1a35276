//! HTTP surface for the mortgage calculator.
//!
//! `POST /mortgage/calculate` and `POST /mortgage/compare` call straight into
//! `homeloan_core`; each request is computed independently.

pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

use std::sync::atomic::Ordering;
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::routes::{router, AppState};

/// Command-line overrides applied on top of the environment configuration.
#[derive(Debug, Default)]
pub struct ServeOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
}

pub async fn serve(overrides: ServeOverrides) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(host) = overrides.host {
        config.server.host = host;
    }
    if let Some(port) = overrides.port {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let state = AppState::default();
    let app = router(state.clone());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    state.readiness.store(true, Ordering::Release);

    info!(?config.environment, %addr, "mortgage calculator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
