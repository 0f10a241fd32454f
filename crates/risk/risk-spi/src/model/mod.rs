//! Data models for risk analytics.

mod metrics;
mod price;

pub use metrics::*;
pub use price::*;
