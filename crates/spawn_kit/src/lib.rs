#![forbid(unsafe_code)]
//! spawn_kit: Level-aware weighted spawn selection and round-robin object pooling.
//!
//! Modules:
//! - selection: per-level spawn tables, chance boundaries, weighted selector
//! - pool: fixed-size round-robin pools, placements, instance contracts
//! - spawner: selector and pool combined into one spawn call
//! - level: current-level providers
//! - events: observable events and sinks
//! - defs: serializable definitions (feature `serde`, RON loading with `ron`)
pub mod error;
pub mod events;
pub mod level;
pub mod pool;
pub mod selection;
pub mod spawner;

#[cfg(feature = "serde")]
pub mod defs;

/// Convenient re-exports for common types. Import with `use spawn_kit::prelude::*;`.
pub mod prelude {
    #[cfg(feature = "serde")]
    pub use crate::defs::{EntryDef, LevelTableDef, PoolDef, SpawnSetDef, SpawnTableDef};
    pub use crate::error::{Error, Result};
    pub use crate::events::{
        ChannelSink, EventSink, FilteredSink, FnSink, MultiSink, SpawnEvent, SpawnEventKind,
        VecSink,
    };
    pub use crate::level::{LevelCell, LevelProvider};
    pub use crate::pool::{
        BasicInstance, ComponentPool, FnFactory, InstanceFactory, Placement, PoolConfig, Poolable,
        ReusePolicy, Transform,
    };
    pub use crate::selection::{
        build_boundaries, pick_weighted, ChanceBoundary, LevelSpawnTable, Selection, SpawnEntry,
        SpawnTable, WeightedSelector,
    };
    pub use crate::spawner::Spawner;
}
