//! Settlement errors.

use kasir::{cart::CartLineIssue, receipt::SettlementReport, settlement::SettlementMathError};
use thiserror::Error;

use crate::domain::products::ProductsServiceError;

#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("cart is empty")]
    EmptyCart,

    /// Live stock no longer covers the cart; nothing was written.
    #[error("cart no longer matches stock on hand")]
    Rejected(Vec<CartLineIssue>),

    /// Live stock could not be read; nothing was written.
    #[error("failed to read product stock")]
    Store(#[source] ProductsServiceError),

    /// A decrement failed after earlier ones were written.
    #[error("settlement incomplete: {0}")]
    PartialFailure(SettlementReport),

    #[error(transparent)]
    Math(#[from] SettlementMathError),
}
