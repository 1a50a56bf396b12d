use glam::Vec3;
use spawn_kit::prelude::*;
use spawn_kit_examples::init_tracing;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut pool: ComponentPool<&str, BasicInstance> = ComponentPool::default();
    let mut factory = FnFactory::new(BasicInstance::default).with_scale(Vec3::splat(0.25));
    pool.create_pool("bullet", &mut factory, 3)?;
    // Registering again keeps the existing instances.
    pool.create_pool("bullet", &mut factory, 10)?;

    let mut sink = FilteredSink::new(
        FnSink::new(|event| info!("{event:?}")),
        [
            SpawnEventKind::InstanceAcquired,
            SpawnEventKind::InstanceRecycled,
        ],
    );

    // Four shots with three bullets: the first one is recycled mid-flight.
    for shot in 0..4 {
        let placement = Placement::at(Vec3::new(shot as f32, 1.0, 0.0));
        let bullet = pool.acquire_with_events("bullet", placement, &mut sink)?;
        bullet.set_active(true);
    }

    match pool.acquire("laser", Placement::default()) {
        Ok(_) => unreachable!("no laser pool was registered"),
        Err(e) => info!("skipping shot: {e}"),
    }

    Ok(())
}
