use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use spawn_kit::prelude::*;
use spawn_kit_examples::init_tracing;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let selector = WeightedSelector::new(
        SpawnTable::new()
            .with_level(LevelSpawnTable::try_from_pairs(
                "meadow",
                [("rabbit".to_string(), 5), ("wolf".to_string(), 1)],
            )?)
            .with_level(LevelSpawnTable::try_from_pairs(
                "forest",
                [("wolf".to_string(), 3), ("bear".to_string(), 1)],
            )?),
    );

    let mut pool: ComponentPool<String, BasicInstance> = ComponentPool::default();
    for (key, size) in [("rabbit", 10), ("wolf", 6), ("bear", 2)] {
        pool.create_pool(
            key.to_string(),
            &mut FnFactory::new(BasicInstance::default),
            size,
        )?;
    }

    let mut level = LevelCell::new("meadow");
    let mut rng = StdRng::seed_from_u64(7);
    let (mut sink, rx) = ChannelSink::unbounded();

    {
        let mut spawner = Spawner::try_new(&selector, &mut pool)?;
        for wave in 0..3 {
            if wave == 2 {
                level.set("forest");
            }
            for i in 0..4 {
                let placement = Placement::at(Vec3::new(i as f32 * 2.0, 0.0, wave as f32));
                if let Some(animal) =
                    spawner.spawn_with_events(level.get(), placement, &mut rng, &mut sink)?
                {
                    animal.set_active(true);
                }
            }
        }
    }

    for event in rx.try_iter() {
        if let SpawnEvent::InstanceAcquired { key, slot } = event {
            info!("spawned {key} #{slot}");
        }
    }
    for key in ["rabbit", "wolf", "bear"] {
        info!(
            "{key}: {} of {} active",
            pool.active_count(key).unwrap_or(0),
            pool.pool_size(key).unwrap_or(0)
        );
    }

    Ok(())
}
