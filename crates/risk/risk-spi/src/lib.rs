//! Risk Metrics Service Provider Interface
//!
//! Defines the price models, the risk report, the error type and the
//! trait contracts shared by every risk engine implementation.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::*;
pub use error::*;
pub use model::*;
