//! Core business logic module
//!
//! This module contains the core card components:
//! - `traits` - Persistence store abstraction
//! - `registry` - Cards, cash pool, authentication and transactions

pub mod registry;
pub mod traits;

pub use registry::CardRegistry;
pub use traits::LineStore;
