//! Core Kernel - Foundational types and utilities for the microfinance system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Tenant monetary configuration and balance tolerances
//! - Common identifiers and value objects
//! - Port infrastructure for persistence collaborators

pub mod config;
pub mod identifiers;
pub mod money;
pub mod ports;

pub use config::TenantMonetaryConfig;
pub use identifiers::{
    AccrualId, FeeStructureId, GlAccountId, JournalEntryId, LedgerLineId, LoanId, OfficeId,
    PaymentId, SavingsAccountId,
};
pub use money::{Currency, Money, MoneyError, Rate};
pub use ports::{DomainPort, PortError};
