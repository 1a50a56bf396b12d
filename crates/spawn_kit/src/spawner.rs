//! Spawner combining weighted selection with pooled instances.
//!
//! A [`Spawner`] borrows a [`WeightedSelector`] whose items are resource keys and a
//! [`ComponentPool`] holding instances for those keys. Each spawn picks a key for
//! the requested level and acquires a placed instance of it.
use std::fmt::Display;
use std::hash::Hash;

use rand::RngCore;
use tracing::debug;

use crate::error::{Error, Result};
use crate::events::EventSink;
use crate::level::LevelProvider;
use crate::pool::{ComponentPool, Placement, Poolable};
use crate::selection::WeightedSelector;

pub struct Spawner<'a, L, K, I> {
    /// Selector deciding which resource to spawn per level.
    pub selector: &'a WeightedSelector<L, K>,
    /// Pools the selected resources are taken from.
    pub pool: &'a mut ComponentPool<K, I>,
}

impl<'a, L, K, I> Spawner<'a, L, K, I>
where
    L: PartialEq + Display,
    K: Eq + Hash + Display,
    I: Poolable,
{
    /// Creates a spawner after checking that every selectable key has a pool.
    pub fn try_new(
        selector: &'a WeightedSelector<L, K>,
        pool: &'a mut ComponentPool<K, I>,
    ) -> Result<Self> {
        let spawner = Self { selector, pool };
        spawner.check_coverage()?;
        Ok(spawner)
    }

    pub fn new(selector: &'a WeightedSelector<L, K>, pool: &'a mut ComponentPool<K, I>) -> Self {
        Self { selector, pool }
    }

    /// Fails with [`Error::InvalidConfig`] naming the first selectable key without a pool.
    pub fn check_coverage(&self) -> Result<()> {
        match self.selector.items().find(|key| !self.pool.contains(*key)) {
            Some(key) => Err(Error::InvalidConfig(format!(
                "spawn table references '{key}' but no pool is registered for it"
            ))),
            None => Ok(()),
        }
    }

    /// Picks a resource for `level` and acquires a placed instance of it.
    ///
    /// `Ok(None)` means the level has nothing to spawn.
    pub fn spawn<R: RngCore + ?Sized>(
        &mut self,
        level: &L,
        placement: Placement,
        rng: &mut R,
    ) -> Result<Option<&mut I>> {
        self.spawn_with_events(level, placement, rng, &mut ())
    }

    pub fn spawn_with_events<R: RngCore + ?Sized>(
        &mut self,
        level: &L,
        placement: Placement,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Result<Option<&mut I>> {
        let Some(selection) = self.selector.select_with_events(level, rng, sink) else {
            return Ok(None);
        };
        debug!(
            "Level '{}' rolled {} of {}: '{}'.",
            level, selection.roll, selection.total_ratio, selection.item
        );
        self.pool
            .acquire_internal(selection.item, placement, sink)
            .map(Some)
    }

    /// Spawns for whatever level `provider` reports as current.
    pub fn spawn_from<P, R>(
        &mut self,
        provider: &P,
        placement: Placement,
        rng: &mut R,
    ) -> Result<Option<&mut I>>
    where
        P: LevelProvider<L> + ?Sized,
        R: RngCore + ?Sized,
    {
        let level = provider.current_level();
        self.spawn(&level, placement, rng)
    }
}
