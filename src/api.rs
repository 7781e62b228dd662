//! HTTP API for the shift balance service.
//!
//! This module exposes the driver's running shift balance using the
//! [`axum`](https://crates.io/crates/axum) framework.  The driver is
//! identified by a header that an upstream gateway sets after it has
//! authenticated the caller; a middleware lifts that header into a
//! [`DriverId`] request extension which the handler then reads.

use crate::balance::BalanceStore;
use crate::config::Config;
use crate::error::Result;
use crate::models::{DriverId, ShiftBalance};
use axum::extract::{Request, State};
use axum::http::HeaderName;
use axum::middleware::{from_fn_with_state, Next};
use axum::response::Response;
use axum::{routing::get, Extension, Json, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Route reporting the current shift balance.
pub const BALANCE_PATH: &str = "/api/driver/shift/balance";

/// Application state shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub balances: Arc<BalanceStore>,
}

/// Build the API router around an existing store.
///
/// `driver_header` names the request header that carries the caller's
/// driver identifier.
pub fn build_router(balances: Arc<BalanceStore>, driver_header: HeaderName) -> Router {
    Router::new()
        .route(BALANCE_PATH, get(shift_balance_handler))
        .layer(from_fn_with_state(driver_header, identify_driver))
        .with_state(AppState { balances })
}

/// Copies the driver identifier header into the request extensions.
///
/// A missing header leaves the extension unset.  So does a value that
/// is not an integer, after logging it.
async fn identify_driver(
    State(header): State<HeaderName>,
    mut req: Request,
    next: Next,
) -> Response {
    let parsed = req.headers().get(&header).map(|raw| {
        raw.to_str()
            .ok()
            .and_then(|value| value.parse::<DriverId>().ok())
            .ok_or_else(|| raw.clone())
    });
    match parsed {
        Some(Ok(driver)) => {
            req.extensions_mut().insert(driver);
        }
        Some(Err(raw)) => {
            warn!(header = %header, value = ?raw, "ignoring malformed driver identifier");
        }
        None => {}
    }
    next.run(req).await
}

/// Handler for GET /api/driver/shift/balance
async fn shift_balance_handler(
    State(state): State<AppState>,
    driver: Option<Extension<DriverId>>,
) -> Json<ShiftBalance> {
    let driver = match driver {
        Some(Extension(driver)) => driver,
        None => {
            // Requests without identity read driver 0's balance.
            warn!(
                fallback = %DriverId::FALLBACK,
                "no driver identity on request, using fallback driver"
            );
            DriverId::FALLBACK
        }
    };
    Json(state.balances.current_shift_balance(driver))
}

/// Launch the API server.  Binds to the configured address and serves
/// until ctrl-c is received, then drains in-flight requests.
pub async fn serve(config: &Config, balances: Arc<BalanceStore>) -> Result<()> {
    let router = build_router(balances, config.driver_header.clone());
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "shift balance server listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("shift balance server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
}
