//! Benchmarks for the ragged merge utility.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use nalgebra::DVector;
use shale_output::merge::{RunArray, merge_append};

fn bench_merge_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_append");

    for ncols in [1usize, 8, 32] {
        let base = DVector::from_fn(4096, |i, _| i as f64);
        let mut existing = RunArray::One(base.clone());
        for _ in 1..ncols {
            existing = merge_append(&existing, base.clone());
        }

        group.bench_function(format!("equal_len/{ncols}"), |b| {
            b.iter(|| merge_append(black_box(&existing), black_box(base.clone())))
        });

        let short = DVector::from_fn(3000, |i, _| i as f64);
        group.bench_function(format!("ragged/{ncols}"), |b| {
            b.iter(|| merge_append(black_box(&existing), black_box(short.clone())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_merge_append);
criterion_main!(benches);
