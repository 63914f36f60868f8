//! Unified loan status resolution
//!
//! Loans and loan applications live in different tables with different
//! status vocabularies. Display and permission checks work on a single
//! four-bucket status derived here. The mapping is a closed, exhaustive
//! match; raw strings from external records go through `resolve_raw`,
//! which warns and degrades to Pending on anything unrecognized.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Status of a loan application before disbursement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    PendingApproval,
    Approved,
    Rejected,
    Withdrawn,
}

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_approval" => Ok(ApplicationStatus::PendingApproval),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            "withdrawn" => Ok(ApplicationStatus::Withdrawn),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Status of an active loan account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Active,
    Overdue,
    Closed,
    FullyPaid,
    WrittenOff,
}

impl FromStr for LoanStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(LoanStatus::Active),
            "overdue" => Ok(LoanStatus::Overdue),
            "closed" => Ok(LoanStatus::Closed),
            "fully_paid" => Ok(LoanStatus::FullyPaid),
            "written_off" => Ok(LoanStatus::WrittenOff),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A status string that matched no known value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

/// The four canonical status buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    /// Disbursed and performing
    Active,
    /// Awaiting approval or disbursement
    Pending,
    /// Overdue or written off
    Problem,
    /// No longer open
    Closed,
}

/// Visual tone for a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Positive,
    Neutral,
    Critical,
    Muted,
}

impl StatusBucket {
    /// Human-readable label for the bucket
    pub fn label(&self) -> &'static str {
        match self {
            StatusBucket::Active => "Active",
            StatusBucket::Pending => "Pending",
            StatusBucket::Problem => "Overdue",
            StatusBucket::Closed => "Closed",
        }
    }

    /// Badge tone for the bucket
    ///
    /// The mapping is exhaustive on purpose; adding a bucket without a
    /// tone fails to compile instead of falling back to a generic style.
    pub fn tone(&self) -> BadgeTone {
        match self {
            StatusBucket::Active => BadgeTone::Positive,
            StatusBucket::Pending => BadgeTone::Neutral,
            StatusBucket::Problem => BadgeTone::Critical,
            StatusBucket::Closed => BadgeTone::Muted,
        }
    }
}

/// Which record the unified status was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusSource {
    Loan,
    Application,
}

/// The canonical status shown for a loan or application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedLoanStatus {
    pub bucket: StatusBucket,
    pub derived_from: StatusSource,
}

/// Resolves a loan account status into its bucket
pub fn resolve_loan(status: LoanStatus) -> UnifiedLoanStatus {
    let bucket = match status {
        LoanStatus::Active => StatusBucket::Active,
        LoanStatus::Overdue | LoanStatus::WrittenOff => StatusBucket::Problem,
        LoanStatus::Closed | LoanStatus::FullyPaid => StatusBucket::Closed,
    };
    UnifiedLoanStatus {
        bucket,
        derived_from: StatusSource::Loan,
    }
}

/// Resolves an application status into its bucket
///
/// Approved applications stay Pending until disbursement turns them
/// into loans.
pub fn resolve_application(status: ApplicationStatus) -> UnifiedLoanStatus {
    let bucket = match status {
        ApplicationStatus::PendingApproval | ApplicationStatus::Approved => StatusBucket::Pending,
        ApplicationStatus::Rejected | ApplicationStatus::Withdrawn => StatusBucket::Closed,
    };
    UnifiedLoanStatus {
        bucket,
        derived_from: StatusSource::Application,
    }
}

/// Resolves a raw status string from an external record
///
/// Total over its input: unrecognized values resolve to Pending with a
/// warning instead of failing the whole listing.
pub fn resolve_raw(raw: &str, source: StatusSource) -> UnifiedLoanStatus {
    match source {
        StatusSource::Loan => match raw.parse::<LoanStatus>() {
            Ok(status) => resolve_loan(status),
            Err(unknown) => {
                warn!(status = %unknown.0, "unrecognized loan status, defaulting to Pending");
                UnifiedLoanStatus {
                    bucket: StatusBucket::Pending,
                    derived_from: source,
                }
            }
        },
        StatusSource::Application => match raw.parse::<ApplicationStatus>() {
            Ok(status) => resolve_application(status),
            Err(unknown) => {
                warn!(status = %unknown.0, "unrecognized application status, defaulting to Pending");
                UnifiedLoanStatus {
                    bucket: StatusBucket::Pending,
                    derived_from: source,
                }
            }
        },
    }
}
