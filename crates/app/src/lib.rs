//! Application services for the kasir point of sale: product storage, settlement and register
//! sessions.

pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;
