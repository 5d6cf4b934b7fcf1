//! Registers
//!
//! Cashier sessions: one cart and one checkout dialog per register.

pub(crate) mod errors;
mod handlers;
pub(crate) mod models;

pub(crate) use handlers::*;
