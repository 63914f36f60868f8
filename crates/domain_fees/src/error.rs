//! Fee domain errors

use core_kernel::MoneyError;
use thiserror::Error;

/// Errors that can occur when working with fee structures
#[derive(Debug, Error)]
pub enum FeeError {
    /// The fee structure's configuration cannot produce a charge
    ///
    /// Never silently defaulted to zero; the caller must fix the
    /// structure.
    #[error("Invalid fee configuration for '{fee_name}': {reason}")]
    InvalidConfiguration { fee_name: String, reason: String },

    /// The calculation method has no implementation
    #[error("Unsupported calculation method for '{fee_name}': {method}")]
    UnsupportedCalculation { fee_name: String, method: String },

    /// The fee structure is not active
    #[error("Fee structure '{0}' is inactive")]
    InactiveFee(String),

    /// Arithmetic failure on money values
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
