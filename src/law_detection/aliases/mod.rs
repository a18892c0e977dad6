//! Alias table loading.

pub mod loader;

pub use loader::*;
