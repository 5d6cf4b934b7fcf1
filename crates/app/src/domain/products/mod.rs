//! Products

pub mod errors;
mod memory;
mod records;
mod repository;
pub mod service;

pub use errors::ProductsServiceError;
pub use memory::InMemoryProductsService;
pub use service::*;
