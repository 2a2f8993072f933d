//! Benchmarks for the fixed-capacity generational pool

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use quay_core::alloc::{Handle, Pool};

#[derive(Clone, Copy, Debug, Default)]
struct GroupLike {
    rect: (f32, f32, f32, f32),
    weight: f32,
    parent: Option<Handle>,
}

fn bench_pool_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_insert");

    for size in [16, 128, 1024] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut pool = Pool::with_capacity("bench pool", size);
                for _ in 0..size {
                    pool.insert(black_box(GroupLike::default()));
                }
                pool
            });
        });
    }

    group.finish();
}

fn bench_pool_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_churn");

    for size in [16, 128, 1024] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut pool = Pool::with_capacity("bench pool", size);
                    let handles: Vec<Handle> =
                        (0..size).map(|_| pool.insert(GroupLike::default())).collect();
                    (pool, handles)
                },
                |(mut pool, handles)| {
                    // Free every other slot and refill, as snap/unsnap churn does.
                    for handle in handles.iter().step_by(2) {
                        pool.remove(black_box(*handle));
                    }
                    for _ in handles.iter().step_by(2) {
                        pool.insert(GroupLike::default());
                    }
                    black_box(pool)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_pool_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_lookup");

    for size in [16, 128, 1024] {
        group.throughput(Throughput::Elements(size as u64));

        let mut pool = Pool::with_capacity("bench pool", size);
        let handles: Vec<Handle> = (0..size)
            .map(|i| {
                pool.insert(GroupLike {
                    weight: i as f32,
                    ..Default::default()
                })
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0;
                for &handle in &handles {
                    if let Some(value) = pool.get(black_box(handle)) {
                        sum += value.weight;
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pool_insert, bench_pool_churn, bench_pool_lookup);
criterion_main!(benches);
