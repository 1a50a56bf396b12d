mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spawn_kit::prelude::{LevelSpawnTable, SpawnTable, WeightedSelector};

fn make_selector(levels: u32, per_level: usize, seed: u64) -> WeightedSelector<u32, usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut table = SpawnTable::new();

    for level in 0..levels {
        let pairs: Vec<(usize, u32)> = (0..per_level)
            .map(|i| (i, 1 + rng.random::<u32>() % 100))
            .collect();
        table.push(LevelSpawnTable::try_from_pairs(level, pairs).expect("ratios are > 0"));
    }

    WeightedSelector::new(table)
}

fn selection_get_item_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/get_item");

    for &n in &[4usize, 16, 64, 256, 1024] {
        let selector = make_selector(8, n, 0xC0FFEE);
        group.throughput(common::entries_per_draw(n));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
            b.iter(|| {
                let sel = selector.get_item(black_box(&3), &mut rng);
                black_box(sel);
            });
        });
    }

    for &levels in &[1u32, 32] {
        let selector = make_selector(levels, 32, 0xFACEFEED);
        group.bench_with_input(BenchmarkId::new("levels", levels), &levels, |b, _| {
            let mut rng = StdRng::seed_from_u64(0xBADC0DE);
            b.iter(|| {
                let sel = selector.get_item(black_box(&0), &mut rng);
                black_box(sel);
            });
        });
    }

    {
        let selector = make_selector(8, 64, 0x0BADF00D);
        group.bench_function("missing_level", |b| {
            let mut rng = StdRng::seed_from_u64(0xFEED);
            b.iter(|| {
                let sel = selector.get_item(black_box(&99), &mut rng);
                black_box(sel);
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::selection_criterion();
    targets = selection_get_item_benches
}
criterion_main!(benches);
