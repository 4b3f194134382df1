//! Cleaning and aggregation benchmarks over synthetic trading days.
//!
//! Run with: `cargo bench --package tickbars-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tickbars_bench::{TICKS_PER_DAY, session_range, synthetic_day, write_tick_files};
use tickbars_lib::prelude::*;

fn clean_benchmark(c: &mut Criterion) {
    let ticks = synthetic_day(16, TICKS_PER_DAY);
    let filter = CleanFilter::default();

    let mut group = c.benchmark_group("clean");
    group.throughput(Throughput::Elements(ticks.len() as u64));
    group.bench_function("one-day", |b| b.iter(|| filter.clean(black_box(&ticks))));
    group.finish();
}

fn aggregate_benchmark(c: &mut Criterion) {
    let ticks = CleanFilter::default().clean(&synthetic_day(16, TICKS_PER_DAY));
    let range = session_range(16);

    let mut group = c.benchmark_group("aggregate");
    group.throughput(Throughput::Elements(ticks.len() as u64));

    for interval in ["1s", "1m", "1h"] {
        let aggregator = BucketAggregator::new(range, Interval::parse(interval))
            .expect("benchmark interval is non-zero");

        group.bench_with_input(BenchmarkId::new("sorted", interval), &ticks, |b, ticks| {
            b.iter(|| aggregator.aggregate_sorted(black_box(ticks)));
        });
        group.bench_with_input(BenchmarkId::new("unsorted", interval), &ticks, |b, ticks| {
            b.iter(|| aggregator.aggregate(black_box(ticks)));
        });
    }

    group.finish();
}

fn pipeline_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let input = write_tick_files(5, TICKS_PER_DAY / 10).expect("write tick files");
    let output = tempfile::tempdir().expect("output dir");
    let range = TimeRange::new(session_range(1).start, session_range(5).end)
        .expect("ordered range");

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);
    group.throughput(Throughput::Elements(5 * (TICKS_PER_DAY / 10) as u64));
    group.bench_function("five-days-1m", |b| {
        let config = RunConfig::new(
            input.path(),
            output.path().join("bars.csv"),
            range,
            Interval::parse("1m"),
        );
        let pipeline = Pipeline::new(config);
        b.iter(|| runtime.block_on(pipeline.run()).expect("pipeline run"));
    });
    group.finish();
}

criterion_group!(
    benches,
    clean_benchmark,
    aggregate_benchmark,
    pipeline_benchmark
);
criterion_main!(benches);
