//! Fixed-size, round-robin pools of reusable instances.
//!
//! A [`ComponentPool`] keeps one queue per resource key. [`ComponentPool::create_pool`]
//! fills a queue eagerly and registering the same key again is a no-op.
//! [`ComponentPool::acquire`] rotates the head instance to the tail, forces it
//! dormant, applies a [`Placement`] with the prefab's scale and lends it to the
//! caller. Activating it is the caller's job. Queues are never resized and there
//! is no explicit release: every instance returns to the rotation by itself.
//!
//! What happens when the least recently handed out instance is still active is
//! governed by [`ReusePolicy`].
use std::borrow::Borrow;
use std::collections::{HashMap, VecDeque};
use std::fmt::Display;
use std::hash::Hash;

use glam::Vec3;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::events::{EventSink, SpawnEvent, SpawnEventKind};

pub mod instance;
pub mod transform;

pub use instance::{BasicInstance, FnFactory, InstanceFactory, Poolable};
pub use transform::{Placement, Transform};

pub const DEFAULT_MAX_POOL_SIZE: usize = 4096;

/// Behavior of [`ComponentPool::acquire`] when the next instance is still active.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReusePolicy {
    /// Force the instance dormant and hand it out again.
    #[default]
    Recycle,
    /// Refuse with [`Error::InUse`] and leave the rotation untouched.
    RejectActive,
}

/// Configuration for a [`ComponentPool`].
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// What to do with an instance that is still active when its turn comes.
    pub reuse_policy: ReusePolicy,
    /// Upper bound for the size of a single pool.
    pub max_pool_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            reuse_policy: ReusePolicy::default(),
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
        }
    }
}

impl PoolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reuse policy.
    pub fn with_reuse_policy(mut self, reuse_policy: ReusePolicy) -> Self {
        self.reuse_policy = reuse_policy;
        self
    }

    /// Sets the maximum size of a single pool.
    pub fn with_max_pool_size(mut self, max_pool_size: usize) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.max_pool_size == 0 {
            return Err(Error::InvalidConfig("max_pool_size must be > 0".into()));
        }
        Ok(())
    }
}

struct Slot<I> {
    index: usize,
    instance: I,
}

struct PoolEntry<I> {
    slots: VecDeque<Slot<I>>,
    prefab_scale: Vec3,
}

/// Pools of instances of type `I`, keyed by resource `K`.
pub struct ComponentPool<K, I> {
    config: PoolConfig,
    entries: HashMap<K, PoolEntry<I>>,
}

impl<K, I> Default for ComponentPool<K, I> {
    fn default() -> Self {
        Self {
            config: PoolConfig::default(),
            entries: HashMap::new(),
        }
    }
}

impl<K, I> ComponentPool<K, I> {
    pub fn try_new(config: PoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            entries: HashMap::new(),
        })
    }

    pub fn new(config: PoolConfig) -> Self {
        debug_assert!(config.max_pool_size > 0, "max_pool_size must be > 0");
        Self {
            config,
            entries: HashMap::new(),
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Number of registered pools.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered resource keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }
}

impl<K, I> ComponentPool<K, I>
where
    K: Eq + Hash + Display,
    I: Poolable,
{
    /// Registers `key` and builds `pool_size` dormant instances with `factory`.
    ///
    /// Returns `Ok(false)` without touching the factory if `key` already has a pool.
    pub fn create_pool<F>(&mut self, key: K, factory: &mut F, pool_size: usize) -> Result<bool>
    where
        F: InstanceFactory<Instance = I> + ?Sized,
    {
        self.create_pool_internal(key, factory, pool_size, &mut ())
    }

    pub fn create_pool_with_events<F>(
        &mut self,
        key: K,
        factory: &mut F,
        pool_size: usize,
        sink: &mut dyn EventSink,
    ) -> Result<bool>
    where
        F: InstanceFactory<Instance = I> + ?Sized,
    {
        self.create_pool_internal(key, factory, pool_size, sink)
    }

    fn create_pool_internal<F>(
        &mut self,
        key: K,
        factory: &mut F,
        pool_size: usize,
        sink: &mut dyn EventSink,
    ) -> Result<bool>
    where
        F: InstanceFactory<Instance = I> + ?Sized,
    {
        if self.entries.contains_key(&key) {
            warn!("Pool '{}' is already registered; ignoring.", key);
            if sink.wants(SpawnEventKind::PoolAlreadyRegistered) {
                sink.send(SpawnEvent::PoolAlreadyRegistered {
                    key: key.to_string(),
                });
            }
            return Ok(false);
        }
        if pool_size > self.config.max_pool_size {
            return Err(Error::InvalidConfig(format!(
                "pool '{}' size {} exceeds max_pool_size {}",
                key, pool_size, self.config.max_pool_size
            )));
        }

        let slots = (0..pool_size)
            .map(|index| {
                let mut instance = factory.instantiate();
                instance.set_active(false);
                Slot { index, instance }
            })
            .collect();

        info!("Pool '{}' created with {} instances.", key, pool_size);
        if sink.wants(SpawnEventKind::PoolCreated) {
            sink.send(SpawnEvent::PoolCreated {
                key: key.to_string(),
                size: pool_size,
            });
        }

        self.entries.insert(
            key,
            PoolEntry {
                slots,
                prefab_scale: factory.prefab_scale(),
            },
        );
        Ok(true)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Hands out the least recently acquired instance of `key`, dormant and placed.
    pub fn acquire<Q>(&mut self, key: &Q, placement: Placement) -> Result<&mut I>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        self.acquire_internal(key, placement, &mut ())
    }

    pub fn acquire_with_events<Q>(
        &mut self,
        key: &Q,
        placement: Placement,
        sink: &mut dyn EventSink,
    ) -> Result<&mut I>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        self.acquire_internal(key, placement, sink)
    }

    pub(crate) fn acquire_internal<Q>(
        &mut self,
        key: &Q,
        placement: Placement,
        sink: &mut dyn EventSink,
    ) -> Result<&mut I>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        let policy = self.config.reuse_policy;
        let Some(entry) = self.entries.get_mut(key) else {
            warn!("No pool registered for '{}'.", key);
            if sink.wants(SpawnEventKind::AcquireMissed) {
                sink.send(SpawnEvent::AcquireMissed {
                    key: key.to_string(),
                });
            }
            return Err(Error::NotFound {
                key: key.to_string(),
            });
        };

        let Some(head) = entry.slots.front() else {
            return Err(Error::EmptyPool {
                key: key.to_string(),
            });
        };
        if head.instance.is_active() {
            let slot = head.index;
            match policy {
                ReusePolicy::RejectActive => {
                    if sink.wants(SpawnEventKind::AcquireRejected) {
                        sink.send(SpawnEvent::AcquireRejected {
                            key: key.to_string(),
                            slot,
                        });
                    }
                    return Err(Error::InUse {
                        key: key.to_string(),
                        slot,
                    });
                }
                ReusePolicy::Recycle => {
                    debug!("Recycling active instance {} of pool '{}'.", slot, key);
                    if sink.wants(SpawnEventKind::InstanceRecycled) {
                        sink.send(SpawnEvent::InstanceRecycled {
                            key: key.to_string(),
                            slot,
                        });
                    }
                }
            }
        }

        entry.slots.rotate_left(1);
        let scale = entry.prefab_scale;
        let Some(slot) = entry.slots.back_mut() else {
            return Err(Error::EmptyPool {
                key: key.to_string(),
            });
        };
        slot.instance.set_active(false);
        slot.instance.set_transform(placement.to_transform(scale));

        if sink.wants(SpawnEventKind::InstanceAcquired) {
            sink.send(SpawnEvent::InstanceAcquired {
                key: key.to_string(),
                slot: slot.index,
            });
        }
        Ok(&mut slot.instance)
    }

    /// Number of instances of `key`, or `None` if unregistered.
    pub fn pool_size<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|e| e.slots.len())
    }

    /// Number of currently active instances of `key`, or `None` if unregistered.
    pub fn active_count<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries
            .get(key)
            .map(|e| e.slots.iter().filter(|s| s.instance.is_active()).count())
    }

    /// Instances of `key` in rotation order; the first is handed out next.
    pub fn instances<Q>(&self, key: &Q) -> Option<impl Iterator<Item = &I>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries
            .get(key)
            .map(|e| e.slots.iter().map(|s| &s.instance))
    }

    /// Puts every instance of `key` back into the dormant state.
    pub fn deactivate_all<Q>(&mut self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        let entry = self.entries.get_mut(key).ok_or_else(|| Error::NotFound {
            key: key.to_string(),
        })?;
        for slot in entry.slots.iter_mut() {
            slot.instance.set_active(false);
        }
        Ok(())
    }
}
