//! Settlement
//!
//! Totals shown on the checkout dialog and the payment method chosen for them.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

use crate::cart::{Cart, CartError};

/// Errors calculating settlement totals.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettlementMathError {
    /// Cart subtotal could not be computed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Tax or total does not fit in minor units.
    #[error("settlement total overflowed")]
    Overflow,
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    /// Cash at the till
    Cash,

    /// Debit or credit card through the EDC terminal
    Card,

    /// QRIS code scan
    Qris,
}

impl PaymentMethod {
    /// Lowercase key.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Qris => "qris",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown payment method key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" | "tunai" => Ok(PaymentMethod::Cash),
            "card" | "kartu" => Ok(PaymentMethod::Card),
            "qris" => Ok(PaymentMethod::Qris),
            _ => Err(UnknownPaymentMethod(s.to_string())),
        }
    }
}

/// VAT applied to every sale (11%).
pub fn tax_rate() -> Percentage {
    Percentage::from(Decimal::new(11, 2))
}

/// Subtotal, tax and grand total in minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Sum of line totals
    pub subtotal: u64,

    /// Tax on the subtotal, rounded half away from zero
    pub tax: u64,

    /// Subtotal plus tax
    pub total: u64,
}

impl Totals {
    /// Apply the tax rate to a subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementMathError::Overflow`] if tax or total do not fit in `u64`.
    pub fn from_subtotal(subtotal: u64) -> Result<Self, SettlementMathError> {
        let tax = tax_of(subtotal)?;
        let total = subtotal
            .checked_add(tax)
            .ok_or(SettlementMathError::Overflow)?;

        Ok(Self {
            subtotal,
            tax,
            total,
        })
    }

    /// Totals for a cart.
    ///
    /// # Errors
    ///
    /// Returns a [`SettlementMathError`] if the subtotal or total overflow.
    pub fn for_cart(cart: &Cart) -> Result<Self, SettlementMathError> {
        Self::from_subtotal(cart.subtotal()?)
    }
}

fn tax_of(subtotal: u64) -> Result<u64, SettlementMathError> {
    let applied: Decimal = tax_rate() * Decimal::from(subtotal);

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(SettlementMathError::Overflow)
}

/// Settlement
///
/// Derived from the cart when payment is confirmed; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// Subtotal, tax and total
    pub totals: Totals,

    /// Chosen payment method
    pub payment_method: PaymentMethod,
}

impl Settlement {
    /// Settle a cart with the given payment method.
    ///
    /// # Errors
    ///
    /// Returns a [`SettlementMathError`] if the totals overflow.
    pub fn for_cart(cart: &Cart, payment_method: PaymentMethod) -> Result<Self, SettlementMathError> {
        Ok(Self {
            totals: Totals::for_cart(cart)?,
            payment_method,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn tax_is_eleven_percent() -> TestResult {
        let totals = Totals::from_subtotal(3_000)?;

        assert_eq!(totals.subtotal, 3_000);
        assert_eq!(totals.tax, 330);
        assert_eq!(totals.total, 3_330);

        Ok(())
    }

    #[test]
    fn tax_rounds_half_away_from_zero() -> TestResult {
        // 50 * 0.11 = 5.5
        assert_eq!(Totals::from_subtotal(50)?.tax, 6);
        // 40 * 0.11 = 4.4
        assert_eq!(Totals::from_subtotal(40)?.tax, 4);

        Ok(())
    }

    #[test]
    fn empty_subtotal_has_no_tax() -> TestResult {
        assert_eq!(Totals::from_subtotal(0)?, Totals::default());

        Ok(())
    }

    #[test]
    fn total_overflow_is_reported() {
        assert_eq!(
            Totals::from_subtotal(u64::MAX),
            Err(SettlementMathError::Overflow)
        );
    }

    #[test]
    fn payment_method_parses_keys_and_labels() -> TestResult {
        assert_eq!("cash".parse::<PaymentMethod>()?, PaymentMethod::Cash);
        assert_eq!("Tunai".parse::<PaymentMethod>()?, PaymentMethod::Cash);
        assert_eq!("KARTU".parse::<PaymentMethod>()?, PaymentMethod::Card);
        assert_eq!("qris".parse::<PaymentMethod>()?, PaymentMethod::Qris);
        assert!("cheque".parse::<PaymentMethod>().is_err());

        Ok(())
    }
}
