//! Range minimum query tier benchmarks
//!
//! Run with: `cargo bench --bench rmq`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use stix::lca::CartesianRmq;
use stix::rmq::{RangeMinimumQuery, RmqTier, build_rmq};

fn random_values(len: usize) -> Vec<i64> {
    let mut state = 0x9e37_79b9_7f4a_7c15_u64;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state % 2001) as i64 - 1000
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("rmq_build");

    for size in [10, 100, 1_000, 10_000, 100_000] {
        let data = random_values(size);
        for tier in [RmqTier::Naive, RmqTier::SparseTable, RmqTier::Block, RmqTier::Cartesian] {
            // Quadratic tables
            if tier == RmqTier::Naive && size > 1_000 {
                continue;
            }
            group.bench_with_input(BenchmarkId::new(format!("{:?}", tier), size), &data, |b, data| {
                b.iter(|| build_rmq(tier, black_box(data.clone())))
            });
        }
    }

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let length = 10_000;
    let data = random_values(length);
    let queries: Vec<(usize, usize)> = random_values(2_000)
        .chunks(2)
        .map(|pair| {
            let i = pair[0].unsigned_abs() as usize * 7 % length;
            let j = pair[1].unsigned_abs() as usize * 13 % length;
            (i, j)
        })
        .collect();

    let mut group = c.benchmark_group("rmq_query");

    for tier in [RmqTier::SparseTable, RmqTier::Block] {
        let rmq = build_rmq(tier, data.clone()).expect("Failed to build table");
        group.bench_function(format!("{:?}", tier), |b| {
            b.iter(|| {
                for &(i, j) in &queries {
                    let _ = black_box(rmq.rmq(i, j));
                }
            })
        });
    }

    // Cartesian reduction over each inner tier
    for tier in [RmqTier::SparseTable, RmqTier::PlusMinusOne] {
        let rmq = CartesianRmq::new(data.clone(), tier).expect("Failed to build table");
        group.bench_function(format!("Cartesian/{:?}", tier), |b| {
            b.iter(|| {
                for &(i, j) in &queries {
                    let _ = black_box(rmq.rmq(i, j));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
