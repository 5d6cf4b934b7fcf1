//! Register Checkout Handlers

pub(crate) mod cancel;
pub(crate) mod confirm;
pub(crate) mod open;
pub(crate) mod select;
