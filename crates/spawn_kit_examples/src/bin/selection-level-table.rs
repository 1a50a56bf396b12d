use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use spawn_kit::prelude::*;
use spawn_kit_examples::init_tracing;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Two levels sharing one item with different odds
    let table = SpawnTable::new()
        .with_level(LevelSpawnTable::try_from_pairs(
            1,
            [("slime", 1), ("goblin", 3)],
        )?)
        .with_level(LevelSpawnTable::try_from_pairs(
            2,
            [("goblin", 1), ("troll", 1)],
        )?);
    let selector = WeightedSelector::new(table);
    let mut rng = StdRng::seed_from_u64(2025);

    for level in [1, 2, 3] {
        for b in selector.boundaries(&level) {
            info!(
                "level {level}: '{}' owns [{}, {}]",
                b.item, b.lower, b.upper
            );
        }

        let draws = 10_000;
        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
        for _ in 0..draws {
            if let Some(item) = selector.get_item(&level, &mut rng) {
                *counts.entry(*item).or_default() += 1;
            }
        }

        if counts.is_empty() {
            info!("level {level}: nothing to spawn");
        }
        for (item, count) in counts {
            info!(
                "level {level}: '{item}' drawn {count} times ({:.1}%)",
                f64::from(count) * 100.0 / f64::from(draws)
            );
        }
    }

    Ok(())
}
