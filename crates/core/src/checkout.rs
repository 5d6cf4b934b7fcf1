//! Checkout
//!
//! State machine behind the checkout dialog:
//!
//! ```text
//! Idle -> Reviewing -> PaymentMethodSelected -> Settling -> Completed
//!                                 ^                  |
//!                                 +----- Failed <----+
//! ```
//!
//! `Completed` holds the receipt for display only; the caller clears the cart when it records
//! completion, and the next cart change or [`Checkout::cancel`] returns the dialog to `Idle`.
//!
//! The machine only tracks dialog state. Writing stock decrements is the caller's job between
//! [`Checkout::begin_settling`] and [`Checkout::complete`] / [`Checkout::fail`].

use thiserror::Error;

use crate::{
    cart::Cart,
    receipt::{Receipt, SettlementReport},
    settlement::{PaymentMethod, Settlement, SettlementMathError, Totals},
};

/// Invalid checkout commands.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout needs at least one cart line.
    #[error("cart is empty")]
    EmptyCart,

    /// The command is not valid in the current state.
    #[error("cannot {action} while checkout is {state}")]
    InvalidTransition {
        /// Current state name
        state: &'static str,
        /// Attempted command
        action: &'static str,
    },

    /// Totals could not be computed.
    #[error(transparent)]
    Totals(#[from] SettlementMathError),
}

/// Why a settlement attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutFailure {
    /// Operator-facing summary
    pub reason: String,

    /// Per-line outcome, when any stock update was attempted
    pub report: Option<SettlementReport>,
}

/// Checkout dialog state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckoutState {
    /// Dialog closed
    #[default]
    Idle,

    /// Dialog open showing totals
    Reviewing {
        /// Totals under review
        totals: Totals,
    },

    /// Payment method chosen, awaiting confirmation
    PaymentMethodSelected {
        /// Totals under review
        totals: Totals,
        /// Chosen method
        payment_method: PaymentMethod,
    },

    /// Stock decrements in flight
    Settling {
        /// Settlement being applied
        settlement: Settlement,
    },

    /// Settlement finished
    Completed {
        /// Receipt of the sale
        receipt: Receipt,
    },

    /// Settlement failed; the cart is intact and the operator may retry
    Failed {
        /// Settlement that was attempted
        settlement: Settlement,
        /// What went wrong
        failure: CheckoutFailure,
    },
}

impl CheckoutState {
    /// Lowercase state name.
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::Reviewing { .. } => "reviewing",
            CheckoutState::PaymentMethodSelected { .. } => "payment_method_selected",
            CheckoutState::Settling { .. } => "settling",
            CheckoutState::Completed { .. } => "completed",
            CheckoutState::Failed { .. } => "failed",
        }
    }
}

/// Checkout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checkout {
    state: CheckoutState,
}

impl Checkout {
    /// A closed checkout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Whether stock decrements are in flight.
    pub fn is_settling(&self) -> bool {
        matches!(self.state, CheckoutState::Settling { .. })
    }

    /// Open (or re-open) the dialog with fresh totals for the cart.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: the cart has no lines.
    /// - [`CheckoutError::InvalidTransition`]: a settlement is in flight.
    /// - [`CheckoutError::Totals`]: totals overflowed.
    pub fn open(&mut self, cart: &Cart) -> Result<Totals, CheckoutError> {
        self.guard_not_settling("open checkout")?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let totals = Totals::for_cart(cart)?;

        self.state = CheckoutState::Reviewing { totals };

        Ok(totals)
    }

    /// Choose how the customer pays.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] unless the dialog is reviewing, has a method
    /// already, or shows a failed attempt.
    pub fn select_payment_method(
        &mut self,
        payment_method: PaymentMethod,
    ) -> Result<(), CheckoutError> {
        let totals = match &self.state {
            CheckoutState::Reviewing { totals }
            | CheckoutState::PaymentMethodSelected { totals, .. } => *totals,
            CheckoutState::Failed { settlement, .. } => settlement.totals,
            state => {
                return Err(CheckoutError::InvalidTransition {
                    state: state.name(),
                    action: "select payment method",
                });
            }
        };

        self.state = CheckoutState::PaymentMethodSelected {
            totals,
            payment_method,
        };

        Ok(())
    }

    /// Confirm payment and enter `Settling`, returning the settlement to apply.
    ///
    /// Totals are recomputed from the cart so the settlement always matches what is charged.
    /// A failed attempt can be retried directly with the same payment method.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidTransition`]: no payment method selected.
    /// - [`CheckoutError::EmptyCart`]: the cart has no lines.
    /// - [`CheckoutError::Totals`]: totals overflowed.
    pub fn begin_settling(&mut self, cart: &Cart) -> Result<Settlement, CheckoutError> {
        let payment_method = match &self.state {
            CheckoutState::PaymentMethodSelected { payment_method, .. } => *payment_method,
            CheckoutState::Failed { settlement, .. } => settlement.payment_method,
            state => {
                return Err(CheckoutError::InvalidTransition {
                    state: state.name(),
                    action: "confirm payment",
                });
            }
        };

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let settlement = Settlement::for_cart(cart, payment_method)?;

        self.state = CheckoutState::Settling { settlement };

        Ok(settlement)
    }

    /// Record a completed settlement.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] unless settling.
    pub fn complete(&mut self, receipt: Receipt) -> Result<(), CheckoutError> {
        if !self.is_settling() {
            return Err(CheckoutError::InvalidTransition {
                state: self.state.name(),
                action: "complete settlement",
            });
        }

        self.state = CheckoutState::Completed { receipt };

        Ok(())
    }

    /// Record a failed settlement.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] unless settling.
    pub fn fail(&mut self, failure: CheckoutFailure) -> Result<(), CheckoutError> {
        let CheckoutState::Settling { settlement } = &self.state else {
            return Err(CheckoutError::InvalidTransition {
                state: self.state.name(),
                action: "fail settlement",
            });
        };

        self.state = CheckoutState::Failed {
            settlement: *settlement,
            failure,
        };

        Ok(())
    }

    /// Close the dialog.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] while settling.
    pub fn cancel(&mut self) -> Result<(), CheckoutError> {
        self.guard_not_settling("cancel checkout")?;

        self.state = CheckoutState::Idle;

        Ok(())
    }

    fn guard_not_settling(&self, action: &'static str) -> Result<(), CheckoutError> {
        if self.is_settling() {
            return Err(CheckoutError::InvalidTransition {
                state: self.state.name(),
                action,
            });
        }

        Ok(())
    }
}
