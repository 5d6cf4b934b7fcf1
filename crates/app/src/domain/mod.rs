//! Kasir Domain Concerns

pub mod checkout;
pub mod products;
pub mod registers;
