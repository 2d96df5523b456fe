// File: crates/graphics-core/benches/classify_bench.rs
// Summary: Shape classification and transpose throughput on large series.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use graphics_core::{classify, transpose, Shape, Tensor};

fn gen_pairs(n: usize) -> Vec<[f64; 2]> {
    (0..n).map(|i| [i as f64, (i as f64 * 0.01).sin()]).collect()
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for &n in &[1_000usize, 100_000usize] {
        let tensor = Tensor::from(gen_pairs(n).into_iter().map(|p| p.to_vec()).collect::<Vec<_>>());
        group.bench_with_input(BenchmarkId::new("rank", n), &tensor, |b, t| {
            b.iter(|| black_box(classify(black_box(t))));
        });
        group.bench_with_input(BenchmarkId::new("shape", n), &tensor, |b, t| {
            b.iter(|| black_box(Shape::of(black_box(t))));
        });
    }
    group.finish();
}

fn bench_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpose");
    for &n in &[10_000usize, 100_000usize] {
        let pts = gen_pairs(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &pts, |b, p| {
            b.iter(|| black_box(transpose(black_box(p))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_transpose);
criterion_main!(benches);
