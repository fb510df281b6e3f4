//! Criterion benchmark for the full restoration pipeline.
//!
//! Run with: cargo bench -p unshade

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use unshade::{PipelineOptions, restore};
use unshade_test::synthetic;

fn bench_restore(c: &mut Criterion) {
    let mut group = c.benchmark_group("restore");
    group.sample_size(20);
    let options = PipelineOptions::default();

    for dim in [100u32, 200] {
        let source = synthetic::test_pattern(dim, dim).unwrap();
        group.throughput(Throughput::Elements((dim * dim) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |b, _| {
            b.iter(|| restore(black_box(&source), &options))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_restore);
criterion_main!(benches);
