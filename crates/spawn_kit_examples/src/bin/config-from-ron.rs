use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use spawn_kit::prelude::*;
use spawn_kit_examples::init_tracing;
use tracing::{info, warn};

const DUNGEON: &str = include_str!("../../assets/dungeon.ron");

fn main() -> anyhow::Result<()> {
    init_tracing();

    let def = SpawnSetDef::from_ron_str(DUNGEON)?;
    let selector = WeightedSelector::new(def.spawn_table()?);
    let config = def.pool_config()?;
    let mut pool: ComponentPool<String, BasicInstance> = ComponentPool::try_new(config)?;
    for p in &def.pools {
        pool.create_pool(
            p.key.clone(),
            &mut FnFactory::new(BasicInstance::default),
            p.size,
        )?;
    }

    let mut spawner = Spawner::try_new(&selector, &mut pool)?;
    let mut rng = StdRng::seed_from_u64(42);
    let level = "keep".to_string();

    // The keep has only six knights; with the in-use guard, extra requests fail.
    for i in 0..12 {
        let placement = Placement::at(Vec3::new(i as f32, 0.0, 0.0));
        match spawner.spawn(&level, placement, &mut rng) {
            Ok(Some(enemy)) => enemy.set_active(true),
            Ok(None) => info!("nothing to spawn in '{level}'"),
            Err(e @ Error::InUse { .. }) => warn!("spawn {i} skipped: {e}"),
            Err(e) => return Err(e.into()),
        }
    }

    info!("{}", def.to_ron_string()?);
    Ok(())
}
