//! Register sessions

pub mod errors;
pub mod models;
pub mod service;

pub use errors::RegistersError;
pub use models::{Register, RegisterSnapshot, RegisterUuid};
pub use service::*;
