//! Exporter Benchmarks — Scrape and Record Hot Paths
//!
//! Run with: cargo bench --bench exporter_bench

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use hybrid_link_probe::adapters::metrics::ProbeMetrics;
use hybrid_link_probe::domain::probe::ProbeOutcome;
use hybrid_link_probe::ports::latency_sink::LatencySink;

/// Benchmark rendering the full exposition payload.
fn bench_render(c: &mut Criterion) {
    let metrics = ProbeMetrics::new().expect("metrics registry");
    metrics.record(&ProbeOutcome::Success {
        latency: Duration::from_millis(42),
        status: 200,
    });

    c.bench_function("render_exposition", |b| {
        b.iter(|| black_box(metrics.render().expect("render")));
    });
}

/// Benchmark publishing one successful outcome.
fn bench_record(c: &mut Criterion) {
    let metrics = ProbeMetrics::new().expect("metrics registry");
    let outcome = ProbeOutcome::Success {
        latency: Duration::from_micros(42_317),
        status: 200,
    };

    c.bench_function("record_success", |b| {
        b.iter(|| metrics.record(black_box(&outcome)));
    });
}

criterion_group!(benches, bench_render, bench_record);
criterion_main!(benches);
