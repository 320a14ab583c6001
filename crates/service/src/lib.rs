//! Service layer for the ship registry.
//! - Separates business rules (validation, rating, merge-on-update) from storage.
//! - Reuses the entity definitions and field rules in the `models` crate.
//! - Storage is reached only through the `ShipRepository` trait.

pub mod errors;
pub mod pagination;
pub mod ship;
pub mod storage;
#[cfg(test)]
pub mod test_support;
