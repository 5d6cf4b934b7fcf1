//! Inventory

pub(crate) mod summary;
