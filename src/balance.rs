//! In-memory shift balance store.
//!
//! The `balance` module tracks a running earnings total per driver.
//! Totals live in a sharded [`DashMap`] so that lookups for different
//! drivers rarely contend, and each total is an [`Accumulator`] whose
//! value is replaced with a compare-and-swap loop.  A credit therefore
//! never holds a map lock while doing arithmetic, and two concurrent
//! credits for the same driver cannot overwrite one another.
//!
//! Entries are created lazily with a zero total on first access by any
//! operation and are never removed; they live as long as the store.

use crate::models::{DriverId, ShiftBalance};
use arc_swap::ArcSwap;
use dashmap::mapref::one::Ref;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, trace};

/// An atomically updated monetary total.
#[derive(Debug)]
pub struct Accumulator {
    value: ArcSwap<Decimal>,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self {
            value: ArcSwap::from_pointee(Decimal::ZERO),
        }
    }
}

impl Accumulator {
    /// Current total.
    pub fn get(&self) -> Decimal {
        **self.value.load()
    }

    /// Adds `amount` and returns the new total.
    ///
    /// The closure may run more than once when another writer wins the
    /// race; it is retried against the fresh value until the swap
    /// succeeds.  Results beyond the decimal range saturate.
    pub fn add(&self, amount: Decimal) -> Decimal {
        let previous = self
            .value
            .rcu(|current| current.saturating_add(amount));
        previous.saturating_add(amount)
    }

    /// Sets the total back to zero.
    pub fn reset(&self) {
        self.value.store(Arc::new(Decimal::ZERO));
    }
}

/// Per-driver shift earnings, shared by every request handler.
///
/// The store is constructed once by the host process and handed to the
/// HTTP layer behind an `Arc`; there is no process-wide instance.
#[derive(Debug, Default)]
pub struct BalanceStore {
    balances: DashMap<DriverId, Accumulator>,
}

impl BalanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the accumulator for `driver`, inserting a zero total if
    /// the driver has not been seen before.
    fn accumulator(&self, driver: DriverId) -> Ref<'_, DriverId, Accumulator> {
        if let Some(existing) = self.balances.get(&driver) {
            return existing;
        }
        // `entry` write-locks the shard, so only one caller inserts; the
        // guard is downgraded straight away to let readers back in.
        self.balances.entry(driver).or_default().downgrade()
    }

    /// Returns the current total for `driver`, zero if nothing has been
    /// credited yet.
    pub fn balance(&self, driver: DriverId) -> Decimal {
        let total = self.accumulator(driver).get();
        trace!(driver_id = %driver, %total, "read shift balance");
        total
    }

    /// Returns the current total for `driver` wrapped for the API.
    pub fn current_shift_balance(&self, driver: DriverId) -> ShiftBalance {
        ShiftBalance::new(self.balance(driver))
    }

    /// Credits `amount` to `driver`'s running total.
    ///
    /// Does nothing when either the driver or the amount is absent.
    pub fn add_earnings(
        &self,
        driver: impl Into<Option<DriverId>>,
        amount: impl Into<Option<Decimal>>,
    ) {
        let (Some(driver), Some(amount)) = (driver.into(), amount.into()) else {
            return;
        };
        let total = self.accumulator(driver).add(amount);
        debug!(driver_id = %driver, %amount, %total, "credited shift earnings");
    }

    /// Sets `driver`'s running total back to zero.
    ///
    /// Does nothing when the driver is absent.
    pub fn reset_balance(&self, driver: impl Into<Option<DriverId>>) {
        let Some(driver) = driver.into() else {
            return;
        };
        self.accumulator(driver).reset();
        debug!(driver_id = %driver, "reset shift balance");
    }

    /// Number of drivers with a tracked balance.
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}
