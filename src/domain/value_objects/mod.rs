//! Value objects for the storefront domain

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Money value object. Storefront prices are Vietnamese dong.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money { amount: Decimal, currency: String }

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self { Self { amount, currency: currency.to_string() } }
    pub fn vnd(amount: Decimal) -> Self { Self::new(amount, "VND") }
    pub fn zero(currency: &str) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency { return Err(MoneyError::CurrencyMismatch); }
        Ok(Money::new(self.amount + other.amount, &self.currency))
    }
    pub fn multiply(&self, qty: u32) -> Money { Money::new(self.amount * Decimal::from(qty), &self.currency) }
}

impl Default for Money { fn default() -> Self { Self::zero("VND") } }

#[derive(Debug, Clone)] pub enum MoneyError { CurrencyMismatch }
impl std::error::Error for MoneyError {}
impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Currency mismatch") }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_money_add() {
        let a = Money::vnd(Decimal::new(120_000, 0));
        let b = Money::vnd(Decimal::new(45_000, 0));
        assert_eq!(a.add(&b).unwrap().amount(), Decimal::new(165_000, 0));
    }
    #[test]
    fn test_money_add_mismatch() {
        let a = Money::vnd(Decimal::ONE);
        let b = Money::new(Decimal::ONE, "USD");
        assert!(a.add(&b).is_err());
    }
    #[test]
    fn test_money_multiply() {
        let unit = Money::vnd(Decimal::new(45_000, 0));
        assert_eq!(unit.multiply(3).amount(), Decimal::new(135_000, 0));
    }
}
