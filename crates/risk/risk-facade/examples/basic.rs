//! Basic example demonstrating the risk report
//!
//! Run with: cargo run --example basic -p risk

use chrono::{Days, NaiveDate};
use risk::{
    compute_risk_metrics, extract, PriceSeries, RiskConfig, RiskEngine, StandardRiskEngine,
};

fn closes(n: usize, drift: f64, amplitude: f64) -> Vec<(NaiveDate, f64)> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let t = i as f64;
            let close = 100.0 + t * drift + amplitude * (t * 0.2).sin() + (t * 1.1).cos();
            (start + Days::new(i as u64), close)
        })
        .collect()
}

fn main() -> Result<(), risk::RiskError> {
    println!("=== risk Basic Examples ===\n");

    let instrument = PriceSeries::from_closes("ACME", closes(252, 0.06, 5.0))?;
    let benchmark = PriceSeries::from_closes("VTI", closes(252, 0.03, 2.0))?;

    // 1. Returns and drawdowns
    let profile = extract(&instrument)?;
    println!("1. Returns: {} observations", profile.len());
    println!("   First returns: {:?}", &profile.returns[..3]);
    println!("   Max drawdown: {:.2}%", profile.max_drawdown() * 100.0);

    // 2. Full report with the default 95% confidence
    let report = compute_risk_metrics(&instrument, &benchmark, 3.9, 0.95)?;
    println!("\n2. Risk report:");
    println!("   Daily volatility:  {}%", report.daily_volatility);
    println!("   Annual volatility: {}%", report.annual_volatility);
    println!("   Max drawdown:      {}%", report.max_drawdown);
    println!("   Annual Sharpe:     {}", report.annual_sharpe);
    println!("   Annual Sortino:    {}", report.annual_sortino);
    println!("   Beta:              {}", report.beta);
    println!("   Correlation:       {}", report.correlation);
    println!("   VaR (95%):         {}%", report.value_at_risk);
    println!("   CVaR (95%):        {}%", report.conditional_var);

    // 3. Configured engine
    let config = RiskConfig::builder().risk_free_rate(5.0).confidence(0.99).build()?;
    let engine = StandardRiskEngine::with_config(config.clone());
    let strict = engine.evaluate(&instrument, &benchmark, &config.rate_source())?;
    println!("\n3. VaR (99%) at 5% risk-free: {}%", strict.value_at_risk);

    println!("\n=== Examples Complete ===");
    Ok(())
}
