//! Register session errors.

use kasir::{
    cart::{CartError, CartLineIssue},
    checkout::CheckoutError,
};
use thiserror::Error;

use crate::domain::{checkout::SettlementError, products::ProductsServiceError};

#[derive(Debug, Error)]
pub enum RegistersError {
    #[error("register not found")]
    NotFound,

    /// A settlement is in flight; the cart cannot change until it finishes.
    #[error("register is settling a payment")]
    Busy,

    /// Opening checkout found lines the live catalog no longer covers.
    #[error("cart no longer matches the catalog")]
    StaleCart(Vec<CartLineIssue>),

    #[error(transparent)]
    Product(#[from] ProductsServiceError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Settlement(#[from] SettlementError),
}
