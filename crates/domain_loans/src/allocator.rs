//! Repayment allocation
//!
//! Splits a payment across a loan's outstanding components, either by a
//! precedence strategy (greedy, in order) or by an explicit manual split
//! validated against the payment amount and the outstanding balances.
//! The allocator is pure: it works on balances already fetched by the
//! caller and never touches storage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Currency, Money};

use crate::error::LoanError;

/// The components a loan balance is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanComponent {
    Penalty,
    Fee,
    Interest,
    Principal,
}

impl LoanComponent {
    /// All components, in default precedence order
    pub const ALL: [LoanComponent; 4] = [
        LoanComponent::Penalty,
        LoanComponent::Fee,
        LoanComponent::Interest,
        LoanComponent::Principal,
    ];
}

impl fmt::Display for LoanComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoanComponent::Penalty => "penalty",
            LoanComponent::Fee => "fee",
            LoanComponent::Interest => "interest",
            LoanComponent::Principal => "principal",
        };
        write!(f, "{}", s)
    }
}

/// Point-in-time snapshot of what is owed on a loan
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutstandingBalances {
    pub principal: Money,
    pub interest: Money,
    pub fee: Money,
    pub penalty: Money,
}

impl OutstandingBalances {
    /// Creates a snapshot with all components in one currency
    pub fn new(principal: Money, interest: Money, fee: Money, penalty: Money) -> Self {
        Self {
            principal,
            interest,
            fee,
            penalty,
        }
    }

    /// A fully repaid loan in the given currency
    pub fn zero(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self::new(zero, zero, zero, zero)
    }

    /// Returns one component's balance
    pub fn component(&self, component: LoanComponent) -> Money {
        match component {
            LoanComponent::Principal => self.principal,
            LoanComponent::Interest => self.interest,
            LoanComponent::Fee => self.fee,
            LoanComponent::Penalty => self.penalty,
        }
    }

    /// Total outstanding across all components
    pub fn total(&self) -> Result<Money, LoanError> {
        Ok(self
            .principal
            .checked_add(&self.interest)?
            .checked_add(&self.fee)?
            .checked_add(&self.penalty)?)
    }
}

/// How a payment was split across loan components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub principal: Money,
    pub interest: Money,
    pub fee: Money,
    pub penalty: Money,
}

impl Allocation {
    /// An empty allocation in the given currency
    pub fn zero(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            principal: zero,
            interest: zero,
            fee: zero,
            penalty: zero,
        }
    }

    /// An allocation with explicit components
    pub fn new(principal: Money, interest: Money, fee: Money, penalty: Money) -> Self {
        Self {
            principal,
            interest,
            fee,
            penalty,
        }
    }

    /// The whole amount against principal, as a disbursement allocates
    pub fn principal_only(amount: Money) -> Self {
        let mut allocation = Self::zero(amount.currency());
        allocation.principal = amount;
        allocation
    }

    /// Returns one component's share
    pub fn component(&self, component: LoanComponent) -> Money {
        match component {
            LoanComponent::Principal => self.principal,
            LoanComponent::Interest => self.interest,
            LoanComponent::Fee => self.fee,
            LoanComponent::Penalty => self.penalty,
        }
    }

    fn set_component(&mut self, component: LoanComponent, amount: Money) {
        match component {
            LoanComponent::Principal => self.principal = amount,
            LoanComponent::Interest => self.interest = amount,
            LoanComponent::Fee => self.fee = amount,
            LoanComponent::Penalty => self.penalty = amount,
        }
    }

    /// Sum of all components
    pub fn total(&self) -> Result<Money, LoanError> {
        Ok(self
            .principal
            .checked_add(&self.interest)?
            .checked_add(&self.fee)?
            .checked_add(&self.penalty)?)
    }

    /// The mirror allocation, used when reversing a payment
    pub fn invert(&self) -> Self {
        Self {
            principal: -self.principal,
            interest: -self.interest,
            fee: -self.fee,
            penalty: -self.penalty,
        }
    }
}

/// Precedence order for strategy allocation
///
/// Injected by the caller; the repayment product decides the order. The
/// default consumes penalties first and principal last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationOrder(Vec<LoanComponent>);

impl AllocationOrder {
    /// Creates an order; every component must appear exactly once
    pub fn new(components: Vec<LoanComponent>) -> Result<Self, LoanError> {
        if components.len() != LoanComponent::ALL.len() {
            return Err(LoanError::InvalidAllocationOrder(format!(
                "expected {} components, got {}",
                LoanComponent::ALL.len(),
                components.len()
            )));
        }
        for component in LoanComponent::ALL {
            if !components.contains(&component) {
                return Err(LoanError::InvalidAllocationOrder(format!(
                    "missing component {}",
                    component
                )));
            }
        }
        Ok(Self(components))
    }

    /// The components in precedence order
    pub fn components(&self) -> &[LoanComponent] {
        &self.0
    }
}

impl Default for AllocationOrder {
    fn default() -> Self {
        Self(LoanComponent::ALL.to_vec())
    }
}

/// Allocates a payment greedily along a precedence order
///
/// Each component consumes as much of the remaining payment as it has
/// outstanding. A remainder after all components is an over-payment and
/// is rejected; decimal subtraction is exact, so no tolerance applies
/// here.
pub fn allocate_with_strategy(
    amount: Money,
    outstanding: &OutstandingBalances,
    order: &AllocationOrder,
) -> Result<Allocation, LoanError> {
    let mut allocation = Allocation::zero(amount.currency());
    let mut remaining = amount;

    for component in order.components() {
        let open = outstanding.component(*component);
        let take = remaining.min_of(&open)?;
        if take.is_positive() {
            allocation.set_component(*component, take);
            remaining = remaining.checked_sub(&take)?;
        }
    }

    if remaining.is_positive() {
        return Err(LoanError::OverAllocation {
            payment: amount.amount(),
            outstanding: outstanding.total()?.amount(),
        });
    }

    Ok(allocation)
}

/// Validates an explicit manual split
///
/// The split must sum to the payment amount within the tenant's balance
/// epsilon, and no component may exceed its outstanding balance.
pub fn allocate_manual(
    amount: Money,
    split: Allocation,
    outstanding: &OutstandingBalances,
    epsilon: Decimal,
) -> Result<Allocation, LoanError> {
    let split_total = split.total()?;
    if !split_total.approx_eq(&amount, epsilon) {
        return Err(LoanError::AmountMismatch {
            expected: amount.amount(),
            actual: split_total.amount(),
        });
    }

    for component in LoanComponent::ALL {
        let allocated = split.component(component);
        let open = outstanding.component(component);
        if allocated.checked_sub(&open)?.is_positive() {
            return Err(LoanError::ComponentExceedsOutstanding {
                component,
                allocated: allocated.amount(),
                outstanding: open.amount(),
            });
        }
    }

    Ok(split)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn kes(amount: Decimal) -> Money {
        Money::new(amount, Currency::KES)
    }

    fn outstanding() -> OutstandingBalances {
        OutstandingBalances::new(kes(dec!(800)), kes(dec!(100)), kes(dec!(50)), kes(dec!(0)))
    }

    #[test]
    fn test_strategy_allocation_consumes_in_order() {
        // fee -> interest -> principal -> penalty
        let order = AllocationOrder::new(vec![
            LoanComponent::Fee,
            LoanComponent::Interest,
            LoanComponent::Principal,
            LoanComponent::Penalty,
        ])
        .unwrap();

        let allocation = allocate_with_strategy(kes(dec!(200)), &outstanding(), &order).unwrap();

        assert_eq!(allocation.fee, kes(dec!(50)));
        assert_eq!(allocation.interest, kes(dec!(100)));
        assert_eq!(allocation.principal, kes(dec!(50)));
        assert_eq!(allocation.penalty, kes(dec!(0)));
        assert_eq!(allocation.total().unwrap(), kes(dec!(200)));
    }

    #[test]
    fn test_default_order_takes_penalty_first() {
        let balances =
            OutstandingBalances::new(kes(dec!(500)), kes(dec!(40)), kes(dec!(20)), kes(dec!(30)));
        let allocation =
            allocate_with_strategy(kes(dec!(60)), &balances, &AllocationOrder::default()).unwrap();

        assert_eq!(allocation.penalty, kes(dec!(30)));
        assert_eq!(allocation.fee, kes(dec!(20)));
        assert_eq!(allocation.interest, kes(dec!(10)));
        assert_eq!(allocation.principal, kes(dec!(0)));
    }

    #[test]
    fn test_strategy_never_exceeds_component_outstanding() {
        let allocation =
            allocate_with_strategy(kes(dec!(120)), &outstanding(), &AllocationOrder::default())
                .unwrap();

        assert_eq!(allocation.fee, kes(dec!(50)));
        assert_eq!(allocation.interest, kes(dec!(70)));
        assert_eq!(allocation.principal, kes(dec!(0)));
    }

    #[test]
    fn test_overpayment_rejected() {
        let result =
            allocate_with_strategy(kes(dec!(1000)), &outstanding(), &AllocationOrder::default());

        match result {
            Err(LoanError::OverAllocation {
                payment,
                outstanding,
            }) => {
                assert_eq!(payment, dec!(1000));
                assert_eq!(outstanding, dec!(950));
            }
            other => panic!("expected OverAllocation, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_payoff_allocates_everything() {
        let allocation =
            allocate_with_strategy(kes(dec!(950)), &outstanding(), &AllocationOrder::default())
                .unwrap();

        assert_eq!(allocation.principal, kes(dec!(800)));
        assert_eq!(allocation.interest, kes(dec!(100)));
        assert_eq!(allocation.fee, kes(dec!(50)));
    }

    #[test]
    fn test_order_must_cover_all_components() {
        let result = AllocationOrder::new(vec![LoanComponent::Fee, LoanComponent::Interest]);
        assert!(matches!(result, Err(LoanError::InvalidAllocationOrder(_))));

        let duplicated = AllocationOrder::new(vec![
            LoanComponent::Fee,
            LoanComponent::Fee,
            LoanComponent::Interest,
            LoanComponent::Principal,
        ]);
        assert!(matches!(
            duplicated,
            Err(LoanError::InvalidAllocationOrder(_))
        ));
    }

    #[test]
    fn test_manual_split_accepted() {
        let split = Allocation::new(kes(dec!(50)), kes(dec!(100)), kes(dec!(50)), kes(dec!(0)));
        let allocation =
            allocate_manual(kes(dec!(200)), split, &outstanding(), dec!(0.01)).unwrap();

        assert_eq!(allocation.total().unwrap(), kes(dec!(200)));
    }

    #[test]
    fn test_manual_split_sum_mismatch_rejected() {
        let split = Allocation::new(kes(dec!(50)), kes(dec!(100)), kes(dec!(40)), kes(dec!(0)));
        let result = allocate_manual(kes(dec!(200)), split, &outstanding(), dec!(0.01));

        match result {
            Err(LoanError::AmountMismatch { expected, actual }) => {
                assert_eq!(expected, dec!(200));
                assert_eq!(actual, dec!(190));
            }
            other => panic!("expected AmountMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_manual_split_within_epsilon_accepted() {
        let split = Allocation::new(
            kes(dec!(50.005)),
            kes(dec!(100)),
            kes(dec!(50)),
            kes(dec!(0)),
        );
        assert!(allocate_manual(kes(dec!(200)), split, &outstanding(), dec!(0.01)).is_ok());
    }

    #[test]
    fn test_manual_split_component_bound_enforced() {
        let split = Allocation::new(kes(dec!(40)), kes(dec!(110)), kes(dec!(50)), kes(dec!(0)));
        let result = allocate_manual(kes(dec!(200)), split, &outstanding(), dec!(0.01));

        match result {
            Err(LoanError::ComponentExceedsOutstanding {
                component,
                allocated,
                outstanding,
            }) => {
                assert_eq!(component, LoanComponent::Interest);
                assert_eq!(allocated, dec!(110));
                assert_eq!(outstanding, dec!(100));
            }
            other => panic!("expected ComponentExceedsOutstanding, got {:?}", other),
        }
    }

    #[test]
    fn test_invert_mirrors_every_component() {
        let allocation =
            Allocation::new(kes(dec!(50)), kes(dec!(100)), kes(dec!(50)), kes(dec!(0)));
        let inverted = allocation.invert();

        assert_eq!(inverted.principal, kes(dec!(-50)));
        assert_eq!(inverted.interest, kes(dec!(-100)));
        assert_eq!(
            allocation.total().unwrap() + inverted.total().unwrap(),
            kes(dec!(0))
        );
    }

    #[test]
    fn test_disbursement_allocates_principal_only() {
        let allocation = Allocation::principal_only(kes(dec!(25000)));
        assert_eq!(allocation.principal, kes(dec!(25000)));
        assert!(allocation.interest.is_zero());
        assert!(allocation.fee.is_zero());
        assert!(allocation.penalty.is_zero());
    }
}
