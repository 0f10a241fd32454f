//! Risk Metrics Core
//!
//! Implementations for return and drawdown extraction, dispersion
//! statistics, ratio and tail-risk derivation, and report assembly.

pub mod engine;
pub mod ratios;
pub mod returns;
pub mod statistics;
pub mod tail;

pub use engine::*;
pub use ratios::*;
pub use returns::*;
pub use statistics::*;
pub use tail::*;
