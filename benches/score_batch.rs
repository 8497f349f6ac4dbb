//! Batch scoring benchmark: sequential vs Rayon scoring of a synthetic batch.

use bird_scorer_rust::{BirdCount, LikelihoodScorer, ObservationRecord};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap().and_hms_opt(12, 0, 0).unwrap()
}

/// ~5,000 records over 250 species spread across 30 days
fn synthetic_batch() -> Vec<ObservationRecord> {
    (0..5_000u32)
        .map(|i| ObservationRecord {
            species_id: format!("sp{}", (i * 7919) % 250),
            common_name: format!("Species {}", (i * 7919) % 250),
            scientific_name: String::new(),
            location_id: format!("L{}", i % 40),
            location_name: String::new(),
            observed_at: now() - Duration::hours(i64::from(i % 720)),
            count: if i % 11 == 0 { BirdCount::Uncounted } else { BirdCount::Exact(i % 9 + 1) },
            latitude: 40.0 + f64::from(i % 100) / 1000.0,
            longitude: -75.0,
            valid: true,
            reviewed: false,
            location_private: false,
        })
        .collect()
}

fn bench_score_batch(c: &mut Criterion) {
    let records = synthetic_batch();
    let scorer = LikelihoodScorer::default();

    c.bench_function("score_batch_sequential", |b| {
        b.iter(|| scorer.score_batch(black_box(&records), now()))
    });
    c.bench_function("score_batch_parallel", |b| {
        b.iter(|| scorer.score_batch_parallel(black_box(&records), now()))
    });
}

criterion_group!(benches, bench_score_batch);
criterion_main!(benches);
