//! Trait contracts for risk analytics.

mod rate_source;
mod risk_engine;

pub use rate_source::*;
pub use risk_engine::*;
