//! Checkout settlement

pub mod errors;
pub mod retry;
pub mod service;

pub use errors::SettlementError;
pub use retry::RetryPolicy;
pub use service::SettlementService;
