//! Fee Domain - Fee Structures and Charge Computation
//!
//! Fees are configured as structures (fixed or percentage of a base
//! amount, with optional floor and cap) and resolved into concrete
//! charges at transaction time. Misconfiguration is an error at
//! computation time, never a silent zero.

pub mod charge;
pub mod error;
pub mod fee;

pub use charge::compute_charge;
pub use error::FeeError;
pub use fee::{CalculationMethod, FeeFrequency, FeeStructure, FeeType};
