use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::prelude::*;
use segtree::SegmentTree;

const LEN: usize = 1 << 16;

fn sum(a: &i64, b: &i64) -> i64 {
    a.wrapping_add(*b)
}

fn values() -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(0);
    (0..LEN).map(|_| rng.gen_range(-1000..1000)).collect()
}

fn build_bench(c: &mut Criterion) {
    let values = values();
    c.bench_function("build", |b| {
        b.iter(|| SegmentTree::build(black_box(&values), sum, 0))
    });
}

fn query_bench(c: &mut Criterion) {
    let tree = SegmentTree::build(&values(), sum, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    c.bench_function("query", |b| {
        b.iter(|| {
            let lo = rng.gen_range(0..LEN);
            let hi = rng.gen_range(lo..LEN);
            black_box(tree.query(lo, hi))
        })
    });
}

fn update_bench(c: &mut Criterion) {
    let values = values();
    let mut group = c.benchmark_group("update");
    group.bench_function("point", |b| {
        let mut tree = SegmentTree::build(&values, sum, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        b.iter(|| {
            let i = rng.gen_range(0..LEN);
            black_box(tree.update(i, i, |x| x + 1))
        })
    });
    group.bench_function("full_range", |b| {
        b.iter_batched(
            || SegmentTree::build(&values, sum, 0).unwrap(),
            |mut tree| black_box(tree.update(0, LEN - 1, |x| x + 1)),
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, build_bench, query_bench, update_bench);
criterion_main!(benches);
