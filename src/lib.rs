//! Shift balance library crate.
//!
//! This crate tracks each driver's earnings for the current shift in
//! memory and reports them over HTTP.  Other parts of a host
//! application credit or reset balances through
//! [`balance::BalanceStore`]; the API can be embedded via
//! [`api::build_router`] or run standalone with [`api::serve`].

pub mod api;
pub mod balance;
pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;

pub use balance::BalanceStore;
pub use error::ServiceError;
pub use models::{DriverId, ShiftBalance};
