//! Register Models

use kasir::{
    cart::{Cart, CartLine},
    checkout::{Checkout, CheckoutError, CheckoutState},
    receipt::{LineReport, SettlementReport},
    settlement::Totals,
    uuids::TypedUuid,
};

use crate::domain::registers::errors::RegistersError;

/// Register UUID
pub type RegisterUuid = TypedUuid<Register>;

/// One cashier session: a cart and its checkout dialog.
#[derive(Debug, Clone, Default)]
pub struct Register {
    pub cart: Cart,
    pub checkout: Checkout,

    /// Stock decrements written by partly failed settlements of the current cart.
    pub applied: Vec<LineReport>,
}

impl Register {
    /// Remember the lines a partly failed settlement wrote, so a retry does not take them again.
    pub fn record_applied(&mut self, report: &SettlementReport) {
        for line in report.applied() {
            match self
                .applied
                .iter_mut()
                .find(|prior| prior.product_uuid == line.product_uuid)
            {
                Some(prior) => *prior = line.clone(),
                None => self.applied.push(line.clone()),
            }
        }
    }

    /// Forget the cart and everything settled for it.
    pub fn finish_sale(&mut self) {
        self.cart.clear();
        self.applied.clear();
    }
}

/// Point-in-time view of a register returned by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterSnapshot {
    pub uuid: RegisterUuid,
    pub lines: Vec<CartLine>,
    pub totals: Totals,
    pub checkout: CheckoutState,
}

impl RegisterSnapshot {
    /// Capture the current cart and checkout state.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart totals overflow.
    pub fn capture(uuid: RegisterUuid, register: &Register) -> Result<Self, RegistersError> {
        let totals = Totals::for_cart(&register.cart).map_err(CheckoutError::from)?;

        Ok(Self {
            uuid,
            lines: register.cart.lines().to_vec(),
            totals,
            checkout: register.checkout.state().clone(),
        })
    }
}
