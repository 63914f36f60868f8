//! Chart of accounts
//!
//! The validator and posting engine treat account ids as opaque; the
//! chart is what gives them meaning. Every account belongs to a
//! reporting category, the category fixes the account type, and the
//! type fixes the side the balance grows on. Services wire their GL
//! postings by looking categories up here rather than hand-picking ids.

use serde::{Deserialize, Serialize};

use core_kernel::GlAccountId;

use crate::line::EntrySide;

/// The five fundamental account types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl AccountType {
    /// The side on which balances of this type grow
    pub fn normal_side(&self) -> EntrySide {
        match self {
            AccountType::Asset | AccountType::Expense => EntrySide::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => {
                EntrySide::Credit
            }
        }
    }
}

/// Reporting category of a general-ledger account
///
/// The set is closed: a category that is not listed here cannot be
/// wired into any posting flow, so an account with a bad category is a
/// compile-time error rather than a silently ignored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    /// Till, vault, and bank balances
    Cash,
    /// Outstanding loan principal
    LoanPortfolio,
    /// Interest and fees receivable
    Receivables,
    /// Member savings and deposits
    MemberSavings,
    /// Member share capital
    ShareCapital,
    /// Statutory and general reserves
    Reserves,
    /// Accounts payable and accrued liabilities
    Payables,
    /// Interest earned on loans
    InterestIncome,
    /// Fee and service charge income
    FeeIncome,
    /// Penalty income
    PenaltyIncome,
    /// Interest paid on savings and borrowings
    InterestExpense,
    /// Loan loss provisions
    ProvisionExpense,
    /// Branch and head-office running costs
    OperatingExpense,
}

impl AccountCategory {
    /// The account type this category reports under
    pub fn account_type(&self) -> AccountType {
        match self {
            AccountCategory::Cash
            | AccountCategory::LoanPortfolio
            | AccountCategory::Receivables => AccountType::Asset,
            AccountCategory::MemberSavings | AccountCategory::Payables => AccountType::Liability,
            AccountCategory::ShareCapital | AccountCategory::Reserves => AccountType::Equity,
            AccountCategory::InterestIncome
            | AccountCategory::FeeIncome
            | AccountCategory::PenaltyIncome => AccountType::Revenue,
            AccountCategory::InterestExpense
            | AccountCategory::ProvisionExpense
            | AccountCategory::OperatingExpense => AccountType::Expense,
        }
    }
}

/// One account in the general ledger
///
/// The type is not stored; it follows from the category, so an account
/// cannot claim to be an asset while reporting as income.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlAccount {
    /// Stable account identifier
    pub id: GlAccountId,
    /// Numbering-scheme code (e.g., "1200")
    pub code: String,
    /// Display name
    pub name: String,
    /// Reporting category
    pub category: AccountCategory,
    /// Optional notes
    pub description: Option<String>,
    /// Whether the account accepts postings
    pub is_active: bool,
}

impl GlAccount {
    /// Creates an active account in the given category
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        category: AccountCategory,
    ) -> Self {
        Self {
            id: GlAccountId::new_v7(),
            code: code.into(),
            name: name.into(),
            category,
            description: None,
            is_active: true,
        }
    }

    /// Attaches a note to the account
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Closes the account to further postings
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// The account type, derived from the category
    pub fn account_type(&self) -> AccountType {
        self.category.account_type()
    }

    /// The side this account's balance grows on
    pub fn normal_side(&self) -> EntrySide {
        self.account_type().normal_side()
    }
}

/// The working chart of accounts for a savings and credit cooperative
///
/// Categories are the lookup key: a posting flow asks for "the fee
/// income account" and gets whichever account the cooperative mapped
/// there. Lookups skip deactivated accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaccoChartOfAccounts {
    accounts: Vec<GlAccount>,
}

impl SaccoChartOfAccounts {
    /// Creates a chart from an explicit account list
    pub fn new(accounts: Vec<GlAccount>) -> Self {
        Self { accounts }
    }

    /// The standard chart a new cooperative starts from
    pub fn standard() -> Self {
        Self::new(vec![
            GlAccount::new("1000", "Cash", AccountCategory::Cash),
            GlAccount::new("1200", "Loan Portfolio", AccountCategory::LoanPortfolio),
            GlAccount::new("1300", "Interest Receivable", AccountCategory::Receivables),
            GlAccount::new("2000", "Member Savings", AccountCategory::MemberSavings),
            GlAccount::new("2100", "Accrued Liabilities", AccountCategory::Payables),
            GlAccount::new("3000", "Share Capital", AccountCategory::ShareCapital),
            GlAccount::new("3100", "Statutory Reserve", AccountCategory::Reserves),
            GlAccount::new("4000", "Interest on Loans", AccountCategory::InterestIncome),
            GlAccount::new("4100", "Fees and Service Charges", AccountCategory::FeeIncome),
            GlAccount::new("4200", "Penalty Income", AccountCategory::PenaltyIncome),
            GlAccount::new("5000", "Interest on Savings", AccountCategory::InterestExpense),
            GlAccount::new("5100", "Loan Loss Provision", AccountCategory::ProvisionExpense),
            GlAccount::new("5200", "Operating Expense", AccountCategory::OperatingExpense),
        ])
    }

    /// All accounts in the chart
    pub fn accounts(&self) -> &[GlAccount] {
        &self.accounts
    }

    /// The first active account in a category, if any
    pub fn account_for(&self, category: AccountCategory) -> Option<&GlAccount> {
        self.accounts
            .iter()
            .find(|a| a.category == category && a.is_active)
    }

    /// The id of the first active account in a category, if any
    pub fn account_id_for(&self, category: AccountCategory) -> Option<GlAccountId> {
        self.account_for(category).map(|a| a.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_side_follows_account_type() {
        assert_eq!(AccountType::Asset.normal_side(), EntrySide::Debit);
        assert_eq!(AccountType::Expense.normal_side(), EntrySide::Debit);
        assert_eq!(AccountType::Liability.normal_side(), EntrySide::Credit);
        assert_eq!(AccountType::Equity.normal_side(), EntrySide::Credit);
        assert_eq!(AccountType::Revenue.normal_side(), EntrySide::Credit);
    }

    #[test]
    fn test_category_fixes_the_account_type() {
        let account = GlAccount::new("1200", "Loan Portfolio", AccountCategory::LoanPortfolio);
        assert_eq!(account.account_type(), AccountType::Asset);
        assert_eq!(account.normal_side(), EntrySide::Debit);

        let savings = GlAccount::new("2000", "Member Savings", AccountCategory::MemberSavings);
        assert_eq!(savings.account_type(), AccountType::Liability);
        assert_eq!(savings.normal_side(), EntrySide::Credit);
    }

    #[test]
    fn test_standard_chart_wires_every_loan_category() {
        let chart = SaccoChartOfAccounts::standard();

        for category in [
            AccountCategory::Cash,
            AccountCategory::LoanPortfolio,
            AccountCategory::MemberSavings,
            AccountCategory::InterestIncome,
            AccountCategory::FeeIncome,
            AccountCategory::PenaltyIncome,
        ] {
            assert!(
                chart.account_for(category).is_some(),
                "standard chart missing {:?}",
                category
            );
        }
    }

    #[test]
    fn test_lookup_skips_deactivated_accounts() {
        let retired = GlAccount::new("1000", "Old Cash", AccountCategory::Cash).deactivated();
        let active = GlAccount::new("1001", "Till", AccountCategory::Cash);
        let active_id = active.id;
        let chart = SaccoChartOfAccounts::new(vec![retired, active]);

        assert_eq!(chart.account_id_for(AccountCategory::Cash), Some(active_id));
    }

    #[test]
    fn test_empty_category_yields_no_account() {
        let chart = SaccoChartOfAccounts::new(vec![GlAccount::new(
            "1000",
            "Cash",
            AccountCategory::Cash,
        )]);

        assert!(chart.account_for(AccountCategory::FeeIncome).is_none());
    }

    #[test]
    fn test_account_builder() {
        let account = GlAccount::new("1110", "Petty Cash", AccountCategory::Cash)
            .with_description("Branch till float");

        assert_eq!(account.description.as_deref(), Some("Branch till float"));
        assert!(account.is_active);
    }
}
