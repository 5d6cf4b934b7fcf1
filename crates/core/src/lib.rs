//! Kasir
//!
//! Point-of-sale domain for small retail shops: the product catalog model, catalog queries,
//! the cashier cart, settlement totals and the checkout state machine.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod money;
pub mod products;
pub mod receipt;
pub mod settlement;
pub mod uuids;

pub mod prelude;
