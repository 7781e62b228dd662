//! Data models for the shift balance service.
//!
//! The `models` module defines the driver identifier used to key
//! balances and the serialisable response returned over HTTP.  The
//! response derives `Serialize` and `Deserialize` so that it can be
//! transmitted to drivers' devices and read back in tests.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies a driver account.
///
/// The value is opaque to this service: it is never validated beyond
/// being present, and any integer is an acceptable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(pub i64);

impl DriverId {
    /// Sentinel substituted when a request carries no driver identity.
    ///
    /// Note that this is indistinguishable from a real driver whose
    /// account number happens to be zero.
    pub const FALLBACK: DriverId = DriverId(0);
}

impl From<i64> for DriverId {
    fn from(value: i64) -> Self {
        DriverId(value)
    }
}

impl FromStr for DriverId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(DriverId)
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The running earnings total for a driver's current shift.
///
/// Serialised as `{"currentTotal": "20.00"}`.  The total is written as
/// a decimal string so that its scale survives the trip to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftBalance {
    /// Sum of all earnings credited since the last reset.
    pub current_total: Decimal,
}

impl ShiftBalance {
    pub fn new(current_total: Decimal) -> Self {
        Self { current_total }
    }
}
