//! Criterion benchmarks for the window filters.
//!
//! Run with: cargo bench -p unshade-filter
//! Run specific: cargo bench -p unshade-filter -- nl_means

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use unshade_filter::{
    box_blur, compensate, difference_of_boxes, estimate_background, median_filter,
    nl_means_denoise,
};
use unshade_test::synthetic;

fn bench_median(c: &mut Criterion) {
    let mut group = c.benchmark_group("median_filter");
    let grid = synthetic::with_noise(&synthetic::test_pattern(256, 256).unwrap(), 20, 1);
    group.throughput(Throughput::Elements(256 * 256));

    for size in [3u32, 5, 9] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| median_filter(black_box(&grid), size))
        });
    }

    group.finish();
}

fn bench_background(c: &mut Criterion) {
    let mut group = c.benchmark_group("background");

    for dim in [100u32, 256] {
        let grid = synthetic::test_pattern(dim, dim).unwrap();
        let bg = estimate_background(&grid, 4).unwrap();
        group.throughput(Throughput::Elements((dim * dim) as u64));

        group.bench_with_input(BenchmarkId::new("estimate", dim), &dim, |b, _| {
            b.iter(|| estimate_background(black_box(&grid), 4))
        });
        group.bench_with_input(BenchmarkId::new("compensate", dim), &dim, |b, _| {
            b.iter(|| compensate(black_box(&grid), black_box(&bg)))
        });
    }

    group.finish();
}

fn bench_nl_means(c: &mut Criterion) {
    let mut group = c.benchmark_group("nl_means");
    group.sample_size(20);
    let grid = synthetic::with_noise(&synthetic::test_pattern(128, 128).unwrap(), 15, 2);
    group.throughput(Throughput::Elements(128 * 128));

    for (search, block) in [(5u32, 3u32), (7, 3), (7, 5)] {
        let id = format!("{search}x{block}");
        group.bench_function(BenchmarkId::from_parameter(id), |b| {
            b.iter(|| nl_means_denoise(black_box(&grid), search, block, 10.0))
        });
    }

    group.finish();
}

fn bench_bandpass(c: &mut Criterion) {
    let mut group = c.benchmark_group("bandpass");
    let grid = synthetic::test_pattern(256, 256).unwrap();
    group.throughput(Throughput::Elements(256 * 256));

    group.bench_function("box_blur_5", |b| b.iter(|| box_blur(black_box(&grid), 5)));
    group.bench_function("difference_3_5", |b| {
        b.iter(|| difference_of_boxes(black_box(&grid), 3, 5))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_median,
    bench_background,
    bench_nl_means,
    bench_bandpass
);
criterion_main!(benches);
