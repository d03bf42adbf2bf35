//! Criterion benchmarks for the aggregation and content-building hot paths.
//!
//! Run with: `cargo bench -p screenlab-runner`
//!
//! Universes are synthetic; a real screen export rarely exceeds a few
//! thousand rows, so the largest size here is an upper bound.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use screenlab_core::{Dataset, Metadata, RawSource};
use screenlab_runner::{
    parse_snapshot, ContentBuilder, Provenance, Ranking, SectorBreakdown, SummaryStatistics,
};

const SECTORS: [&str; 6] = ["TECH", "FIN", "HLTH", "ENER", "INDU", "UTIL"];

/// Generate a synthetic snapshot export with `rows` instruments.
fn generate_snapshot(rows: usize) -> String {
    let mut text = String::from("Bench Universe,,,\n01/02/2025,,,\n,,,\n");
    text.push_str("Ticker,Name,MktCap,SectorCode,Unnamed: 4\n");
    for i in 0..rows {
        let cap = if i % 17 == 0 {
            "n/a".to_string()
        } else {
            format!("\"{}.25\"", 1_000 + (i * 7_919) % 2_500_000)
        };
        text.push_str(&format!(
            "T{i},Company {i},{cap},{},\n",
            SECTORS[i % SECTORS.len()]
        ));
    }
    text
}

fn generate_dataset(rows: usize) -> Dataset {
    parse_snapshot(RawSource::from_text(&generate_snapshot(rows)))
        .expect("synthetic snapshot parses")
        .dataset
}

fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");

    for size in [100, 1_000, 10_000].iter() {
        let text = generate_snapshot(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let _ = parse_snapshot(RawSource::from_text(black_box(&text)));
            });
        });
    }

    group.finish();
}

fn bench_aggregates(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregates");

    for size in [100, 1_000, 10_000].iter() {
        let ds = generate_dataset(*size);

        group.bench_with_input(BenchmarkId::new("summary", size), size, |b, _| {
            b.iter(|| SummaryStatistics::compute(black_box(&ds)));
        });
        group.bench_with_input(BenchmarkId::new("breakdown", size), size, |b, _| {
            b.iter(|| SectorBreakdown::compute(black_box(&ds)));
        });
        group.bench_with_input(BenchmarkId::new("top_15", size), size, |b, _| {
            b.iter(|| Ranking::top_k(black_box(&ds), 15, 40));
        });
    }

    group.finish();
}

fn bench_content_model(c: &mut Criterion) {
    let ds = generate_dataset(5_000);
    let summary = SummaryStatistics::compute(&ds);
    let breakdown = SectorBreakdown::compute(&ds);
    let ranking = Ranking::top_k(&ds, 15, 40);
    let metadata = Metadata::default();
    let builder = ContentBuilder::new("Unknown");
    let provenance = Provenance {
        source: None,
        source_hash: String::new(),
        generated_at: Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap(),
    };

    c.bench_function("content_model_build", |b| {
        b.iter(|| {
            builder.build(
                black_box(&metadata),
                &summary,
                &breakdown,
                &ranking,
                provenance.clone(),
            )
        });
    });
}

criterion_group!(benches, bench_ingest, bench_aggregates, bench_content_model);
criterion_main!(benches);
