//! Tenant monetary configuration
//!
//! Each tenant runs its books in a single currency with a fixed number of
//! decimal places. The balance-check tolerance used throughout the ledger
//! is derived from that scale instead of being hard-coded at call sites.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Currency;

/// Monetary settings for one tenant
///
/// Host applications construct this once per tenant and pass it into the
/// domain services explicitly. There is no global registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantMonetaryConfig {
    /// Book currency for this tenant
    pub currency: Currency,
    /// Decimal places carried on posted amounts
    pub decimal_places: u32,
}

impl TenantMonetaryConfig {
    /// Creates a configuration using the currency's standard scale
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            decimal_places: currency.decimal_places(),
        }
    }

    /// Overrides the decimal places (some tenants book UGX at 2dp)
    pub fn with_decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// The tolerance for balance comparisons at this scale
    ///
    /// One minor unit: 0.01 at two decimal places, 1 at zero.
    pub fn balance_epsilon(&self) -> Decimal {
        Decimal::new(1, self.decimal_places)
    }
}

impl Default for TenantMonetaryConfig {
    fn default() -> Self {
        Self::new(Currency::KES)
    }
}
