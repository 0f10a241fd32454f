//! Benchmark suite for risk report assembly.

use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use risk_core::{compute_risk_metrics, extract, tail_risk, DispersionStats};
use risk_spi::PriceSeries;

fn create_series(symbol: &str, size: usize, amplitude: f64) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let bars = (0..size).map(|i| {
        let t = i as f64;
        let close = 100.0 + t * 0.02 + amplitude * (t * 0.3).sin() + (t * 0.07).cos();
        (start + Days::new(i as u64), close)
    });
    PriceSeries::from_closes(symbol, bars).unwrap()
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("RiskReport");

    for size in [252usize, 1_260, 5_040].iter() {
        let instrument = create_series("BENCH", *size, 4.0);
        let benchmark = create_series("VTI", *size, 2.0);

        group.bench_with_input(
            BenchmarkId::new("compute_risk_metrics", size),
            &(instrument, benchmark),
            |b, (instrument, benchmark)| {
                b.iter(|| {
                    compute_risk_metrics(black_box(instrument), black_box(benchmark), 3.9, 0.95)
                });
            },
        );
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let instrument = create_series("BENCH", 2_520, 4.0);
    let benchmark = create_series("VTI", 2_520, 2.0);
    let profile = extract(&instrument).unwrap();
    let market = extract(&benchmark).unwrap();

    let mut group = c.benchmark_group("RiskStages");
    group.bench_function("extract", |b| b.iter(|| extract(black_box(&instrument))));
    group.bench_function("dispersion", |b| {
        b.iter(|| DispersionStats::from_returns(black_box(&profile.returns), black_box(&market.returns)))
    });
    group.bench_function("tail_risk", |b| {
        b.iter(|| tail_risk(black_box(&profile.returns), 0.95))
    });
    group.finish();
}

criterion_group!(benches, bench_report, bench_stages);
criterion_main!(benches);
