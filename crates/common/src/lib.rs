//! Cross-cutting helpers shared by the ship registry crates.

pub mod env;
pub mod types;
pub mod utils;
