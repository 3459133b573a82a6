// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Arc — Arc Length Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, Criterion};
use ellip_core::arc::{arc_length, arc_lengths, perimeter};
use std::f64::consts::PI;
use std::hint::black_box;

fn bench_scalar_arc(c: &mut Criterion) {
    let mut group = c.benchmark_group("arc_length_scalar");

    group.bench_function("direct_5x10", |b| {
        b.iter(|| arc_length(black_box(5.0), black_box(10.0), PI / 10.0, PI / 2.0))
    });
    group.bench_function("complementary_10x5", |b| {
        b.iter(|| arc_length(black_box(10.0), black_box(5.0), PI / 10.0, PI / 2.0))
    });
    group.bench_function("perimeter_5x10", |b| {
        b.iter(|| perimeter(black_box(5.0), black_box(10.0)))
    });

    group.finish();
}

fn bench_batched_arc(c: &mut Criterion) {
    let mut group = c.benchmark_group("arc_length_batched");

    for &n in &[64usize, 1024, 16384] {
        let theta1s: Vec<f64> = (0..n).map(|i| 2.0 * PI * i as f64 / n as f64).collect();
        group.bench_function(format!("{n}_bounds"), |b| {
            b.iter(|| {
                let s = arc_lengths(3.0, 1.0, &[0.0], &theta1s).expect("valid bounds");
                black_box(s[n - 1]);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scalar_arc, bench_batched_arc);
criterion_main!(benches);
