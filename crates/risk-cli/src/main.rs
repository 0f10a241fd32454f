//! # riskmetrics
//!
//! Command-line risk report over locally stored daily price files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod loader;
mod report;

use loader::{load_series, symbol_from_path};
use report::{build_report, build_series, resolve_config, write_json, ConfigOverrides};

#[derive(Parser)]
#[command(name = "riskmetrics")]
#[command(about = "Risk metrics for a price series against a benchmark", long_about = None)]
struct Cli {
    /// JSON risk configuration file
    #[arg(long, global = true, env = "RISK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the risk report for an instrument against a benchmark
    Report {
        /// Instrument price file (CSV or JSON)
        #[arg(short, long)]
        instrument: PathBuf,

        /// Benchmark price file (CSV or JSON)
        #[arg(short, long)]
        benchmark: PathBuf,

        /// Instrument symbol (default: file stem)
        #[arg(long)]
        symbol: Option<String>,

        /// Benchmark symbol (default: file stem)
        #[arg(long)]
        benchmark_symbol: Option<String>,

        /// Annual risk-free rate in percent
        #[arg(short, long, env = "RISK_FREE_RATE")]
        risk_free_rate: Option<f64>,

        /// VaR / CVaR confidence level
        #[arg(short, long)]
        confidence: Option<f64>,

        /// Number of most recent bars kept per series
        #[arg(short, long)]
        lookback: Option<usize>,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Dump daily returns and drawdowns for one price file
    Series {
        /// Input price file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Symbol (default: file stem)
        #[arg(long)]
        symbol: Option<String>,

        /// Number of most recent bars kept
        #[arg(short, long)]
        lookback: Option<usize>,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn load(path: &Path, symbol: Option<String>) -> Result<risk::PriceSeries> {
    let symbol = symbol.unwrap_or_else(|| symbol_from_path(path));
    load_series(path, &symbol).with_context(|| format!("Failed to load {}", path.display()))
}

fn run_report(
    config_path: Option<&Path>,
    instrument: PathBuf,
    benchmark: PathBuf,
    symbol: Option<String>,
    benchmark_symbol: Option<String>,
    overrides: ConfigOverrides,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(config_path, &overrides)?;
    let instrument = load(&instrument, symbol)?;
    let benchmark = load(&benchmark, benchmark_symbol)?;

    let report = build_report(&instrument, &benchmark, &config)?;
    write_json(&report, output.as_deref())
}

fn run_series(
    config_path: Option<&Path>,
    input: PathBuf,
    symbol: Option<String>,
    lookback: Option<usize>,
    output: Option<PathBuf>,
) -> Result<()> {
    let overrides = ConfigOverrides {
        lookback,
        ..Default::default()
    };
    let config = resolve_config(config_path, &overrides)?;
    let series = load(&input, symbol)?;

    let dump = build_series(&series, config.lookback)?;
    write_json(&dump, output.as_deref())
}

fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays pure JSON.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "riskmetrics=info,risk_core=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Report {
            instrument,
            benchmark,
            symbol,
            benchmark_symbol,
            risk_free_rate,
            confidence,
            lookback,
            output,
        } => run_report(
            config_path,
            instrument,
            benchmark,
            symbol,
            benchmark_symbol,
            ConfigOverrides {
                risk_free_rate,
                confidence,
                lookback,
            },
            output,
        ),

        Commands::Series {
            input,
            symbol,
            lookback,
            output,
        } => run_series(config_path, input, symbol, lookback, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
