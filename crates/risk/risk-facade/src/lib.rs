//! Risk Metrics Facade
//!
//! Unified re-exports for the risk module.
//!
//! This facade provides access to all risk analytics components:
//! - `risk_spi` - Price models, the report type, errors and engine traits
//! - `risk_api` - Configuration and the configured risk-free rate
//! - `risk_core` - Returns, drawdowns, dispersion statistics, ratios, VaR/CVaR
//!   and report assembly
//!
//! # Example
//!
//! ```rust,ignore
//! use risk::{compute_risk_metrics, PriceSeries, DEFAULT_CONFIDENCE};
//!
//! let report = compute_risk_metrics(&instrument, &benchmark, 3.9, DEFAULT_CONFIDENCE)?;
//! println!("annual Sharpe {}", report.annual_sharpe);
//! ```

// Re-export everything from SPI (traits, errors, types)
pub use risk_spi::*;

// Re-export everything from API (configs)
pub use risk_api::*;

// Re-export everything from Core (implementations)
pub use risk_core::*;
