//! Entry point for the shift balance binary.
//!
//! Running this binary starts an HTTP server that reports each
//! driver's current shift earnings.  The bind address, the header
//! carrying the driver identifier and the log format are taken from
//! `SHIFT_BALANCE_*` environment variables; see [`Config`].

use anyhow::{Context, Result};
use shift_balance::api;
use shift_balance::config::Config;
use shift_balance::telemetry;
use shift_balance::BalanceStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("loading configuration")?;
    telemetry::init_logger(config.log_format)?;

    let balances = Arc::new(BalanceStore::new());
    api::serve(&config, balances)
        .await
        .context("running shift balance server")
}
