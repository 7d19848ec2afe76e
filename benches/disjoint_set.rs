use {
    std::hint::black_box,
    criterion::{criterion_group, criterion_main, BenchmarkId, Criterion},
    rand::{rngs::StdRng, seq::SliceRandom, SeedableRng},
    disjoint_subsets::DisjointSet,
};

const SIZES: [i64; 3] = [1_000, 10_000, 100_000];

/// The numbers `0 .. len` in a fixed random order.
fn inserts(len: i64) -> Vec<i64> {
    let mut inserts: Vec<i64> = (0 .. len).collect();
    inserts.shuffle(&mut StdRng::seed_from_u64(len as u64));

    inserts
}

/// Inserts every value joined with its numeric neighbours.
fn build(inserts: &[i64]) -> DisjointSet<i64> {
    let mut disjoint_set = DisjointSet::with_capacity(inserts.len());
    for &value in inserts {
        disjoint_set.insert(value, &[value - 1, value + 1]);
    }

    disjoint_set
}

fn queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("DisjointSet");

    for &len in SIZES.iter() {
        let inserts = inserts(len);
        let disjoint_set = build(&inserts);

        group.bench_with_input(BenchmarkId::new("is_empty", len), &disjoint_set, |b, disjoint_set| {
            b.iter(|| black_box(disjoint_set).is_empty())
        });

        group.bench_with_input(BenchmarkId::new("len", len), &disjoint_set, |b, disjoint_set| {
            b.iter(|| black_box(disjoint_set).len())
        });

        group.bench_with_input(BenchmarkId::new("insert", len), &inserts, |b, inserts| {
            b.iter(|| build(black_box(inserts)))
        });

        group.bench_with_input(BenchmarkId::new("contains", len), &disjoint_set, |b, disjoint_set| {
            b.iter(|| (0 .. len).filter(|value| disjoint_set.contains(black_box(value))).count())
        });

        group.bench_with_input(BenchmarkId::new("all_subsets", len), &disjoint_set, |b, disjoint_set| {
            b.iter(|| disjoint_set.all_subsets().map(Iterator::count).sum::<usize>())
        });

        group.bench_with_input(BenchmarkId::new("subset_containing", len), &disjoint_set, |b, disjoint_set| {
            b.iter(|| {
                (0i64 .. 100).filter_map(|value| disjoint_set.subset_containing(black_box(&value)))
                    .map(Iterator::count)
                    .sum::<usize>()
            })
        });

        // The first insert into a clone copies the shared nodes.
        group.bench_with_input(BenchmarkId::new("copy_on_write", len), &disjoint_set, |b, disjoint_set| {
            b.iter(|| {
                let mut copy = disjoint_set.clone();
                copy.insert(len, &[len - 1]);

                copy
            })
        });
    }

    group.finish();
}

criterion_group!(benches, queries);
criterion_main!(benches);
