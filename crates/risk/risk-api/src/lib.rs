//! Risk Metrics API
//!
//! Configuration types and the configured risk-free rate source.

pub mod config;

pub use config::*;
