//! Money value object.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use freshmart_core::{DomainError, DomainResult, ValueObject};

const DEFAULT_CURRENCY: &str = "CNY";
const SCALE: u32 = 2;

/// Fixed-scale monetary amount.
///
/// Amounts are normalized to two decimals with half-up rounding at
/// construction, so every `Money` in the system carries the same scale.
/// Immutable; arithmetic returns new instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount: amount.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero),
            currency: currency.into(),
        }
    }

    /// Amount in the default currency.
    pub fn of(amount: Decimal) -> Self {
        Self::new(amount, DEFAULT_CURRENCY)
    }

    pub fn zero() -> Self {
        Self::of(Decimal::ZERO)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn add(&self, other: &Money) -> DomainResult<Money> {
        self.check_currency(other)?;
        Ok(Self::new(self.amount + other.amount, self.currency.clone()))
    }

    pub fn subtract(&self, other: &Money) -> DomainResult<Money> {
        self.check_currency(other)?;
        Ok(Self::new(self.amount - other.amount, self.currency.clone()))
    }

    fn check_currency(&self, other: &Money) -> DomainResult<()> {
        if self.currency != other.currency {
            return Err(DomainError::invalid_argument(format!(
                "currency mismatch: {} vs {}",
                self.currency, other.currency
            )));
        }
        Ok(())
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn amounts_are_normalized_to_two_decimals_half_up() {
        assert_eq!(Money::of(dec("10.005")).amount(), dec("10.01"));
        assert_eq!(Money::of(dec("10.004")).amount(), dec("10.00"));
        assert_eq!(Money::of(dec("10")).amount(), dec("10.00"));
    }

    #[test]
    fn equal_amounts_are_equal_values() {
        assert_eq!(Money::of(dec("19.99")), Money::of(dec("19.99")));
        assert_ne!(Money::of(dec("19.99")), Money::new(dec("19.99"), "USD"));
    }

    #[test]
    fn arithmetic_preserves_scale() {
        let sum = Money::of(dec("1.25")).add(&Money::of(dec("2.10"))).unwrap();
        assert_eq!(sum, Money::of(dec("3.35")));

        let diff = Money::of(dec("5.00")).subtract(&Money::of(dec("0.01"))).unwrap();
        assert_eq!(diff, Money::of(dec("4.99")));
    }

    #[test]
    fn mixed_currency_arithmetic_is_rejected() {
        let err = Money::of(dec("1")).add(&Money::new(dec("1"), "USD")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn zero_is_not_positive() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_positive());
        assert!(Money::of(dec("0.01")).is_positive());
    }
}
