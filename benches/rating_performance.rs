//! Performance benchmarks for rating and aggregation passes

use bout_ledger::config::AppConfig;
use bout_ledger::pipeline::run_pipeline;
use bout_ledger::rating::{apply_outcome, EloRatingCalculator, RatingEngine};
use bout_ledger::stats::AggregationEngine;
use bout_ledger::types::{MatchRecord, Outcome, RawCounter, RawCounters};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn counters(strikes: u64) -> RawCounters {
    [
        ("knockdowns".to_string(), RawCounter::from(strikes % 3)),
        ("strikes".to_string(), RawCounter::from(strikes)),
        ("takedowns".to_string(), RawCounter::from("--")),
    ]
    .into_iter()
    .collect()
}

/// Deterministic log over a fixed roster
fn create_log(matches: usize, roster: usize) -> Vec<MatchRecord> {
    (0..matches)
        .map(|index| {
            let a = index % roster;
            let b = (index * 7 + 1) % roster;
            let b = if a == b { (b + 1) % roster } else { b };
            let outcome = match index % 9 {
                0..=3 => Outcome::AWin,
                4..=6 => Outcome::BWin,
                7 => Outcome::Draw,
                _ => Outcome::NoContest,
            };
            MatchRecord::new(
                index,
                format!("fighter_{}", a),
                format!("fighter_{}", b),
                outcome,
            )
            .with_counters(counters(index as u64 % 80), counters(index as u64 % 55))
        })
        .collect()
}

fn bench_apply_outcome(c: &mut Criterion) {
    c.bench_function("apply_outcome", |b| {
        b.iter(|| {
            black_box(apply_outcome(
                black_box(1020.0),
                black_box(980.0),
                black_box(0.0),
                black_box(40.0),
            ))
        })
    });
}

fn bench_rating_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("rating_pass");

    for size in [1_000usize, 10_000] {
        let log = create_log(size, 500);
        group.bench_with_input(BenchmarkId::from_parameter(size), &log, |b, log| {
            b.iter(|| {
                let mut engine = RatingEngine::new(EloRatingCalculator::default());
                black_box(engine.run(log).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_aggregation_pass(c: &mut Criterion) {
    let log = create_log(10_000, 500);
    let tracked = AppConfig::default().stats.tracked_counters;

    c.bench_function("aggregation_pass_10000", |b| {
        b.iter(|| {
            let mut engine = AggregationEngine::new(tracked.clone());
            black_box(engine.run(&log).unwrap())
        })
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let log = create_log(10_000, 500);
    let config = AppConfig::default();

    c.bench_function("pipeline_10000", |b| {
        b.iter(|| black_box(run_pipeline(&log, &config).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_apply_outcome,
    bench_rating_pass,
    bench_aggregation_pass,
    bench_full_pipeline
);
criterion_main!(benches);
