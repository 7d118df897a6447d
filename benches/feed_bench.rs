//! Benchmarks for activity log handling
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use serde_json::json;
use vantage::*;

fn create_test_body(count: usize) -> Vec<u8> {
    let kinds = ["info", "success", "warning", "error", "milestone"];
    let log: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "timestamp": format!("2024-05-01T10:{:02}:{:02}Z", (i / 60) % 60, i % 60),
                "message": format!("Step {} of the analysis run", i),
                "type": kinds[i % kinds.len()],
                "phase": if i % 3 == 0 { Some("research") } else { None },
            })
        })
        .collect();

    serde_json::to_vec(&json!({ "log": log })).unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 100, 1000] {
        let body = create_test_body(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("activity_log_{}", size), |b| {
            b.iter(|| parse_activity_log(black_box(&body)).unwrap())
        });
    }

    group.finish();
}

fn bench_feed(c: &mut Criterion) {
    let mut group = c.benchmark_group("feed");

    let entries = parse_activity_log(&create_test_body(1000)).unwrap();

    group.bench_function("apply_and_observe_1000", |b| {
        let feed = FeedState::new();
        let generation = feed.rebind(&SubjectId::from("bench"));
        let mut scroll = AutoScroll::new();
        let mut seq = 0;

        b.iter(|| {
            seq += 1;
            feed.apply(FetchTag { generation, seq }, entries.clone());
            scroll.observe(black_box(&feed.snapshot()))
        })
    });

    group.bench_function("clock_labels_1000", |b| {
        b.iter(|| {
            entries
                .iter()
                .map(|e| e.clock_label())
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

fn bench_streaks(c: &mut Criterion) {
    c.bench_function("dark_overlay", |b| {
        b.iter(|| TransitionOverlay::new(black_box(Theme::Dark)))
    });
}

criterion_group!(benches, bench_parse, bench_feed, bench_streaks);
criterion_main!(benches);
