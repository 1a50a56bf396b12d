//! Serializable definitions for spawn tables and pools.
//!
//! A [`SpawnSetDef`] describes levels with their weighted entries plus the pools
//! backing each entry. A [`SpawnTableDef`] holds the levels alone. Definitions are
//! plain data; [`SpawnSetDef::spawn_table`] and [`SpawnSetDef::pool_config`] turn
//! them into validated runtime types. With the `ron` feature they can be read
//! from RON text.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pool::{PoolConfig, ReusePolicy, DEFAULT_MAX_POOL_SIZE};
use crate::selection::{LevelSpawnTable, SpawnTable};

/// One weighted entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDef {
    pub item: String,
    pub ratio: u32,
}

/// Entries for one level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTableDef {
    pub level: String,
    pub entries: Vec<EntryDef>,
}

/// Pool to create for one resource key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolDef {
    pub key: String,
    pub size: usize,
}

/// Level tables without any pool setup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnTableDef {
    pub levels: Vec<LevelTableDef>,
}

impl SpawnTableDef {
    /// Validated selector table keyed by level name.
    pub fn spawn_table(&self) -> Result<SpawnTable<String, String>> {
        build_table(&self.levels)
    }

    #[cfg(feature = "ron")]
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let def: Self = ron::from_str(text).map_err(|e| Error::Parse(e.to_string()))?;
        def.spawn_table()?;
        Ok(def)
    }

    #[cfg(feature = "ron")]
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::Other(e.to_string()))
    }
}

impl From<&SpawnTable<String, String>> for SpawnTableDef {
    fn from(table: &SpawnTable<String, String>) -> Self {
        let levels = table
            .levels
            .iter()
            .map(|t| LevelTableDef {
                level: t.level.clone(),
                entries: t
                    .entries
                    .iter()
                    .map(|e| EntryDef {
                        item: e.item.clone(),
                        ratio: e.ratio.get(),
                    })
                    .collect(),
            })
            .collect();
        Self { levels }
    }
}

fn build_table(levels: &[LevelTableDef]) -> Result<SpawnTable<String, String>> {
    let mut table = SpawnTable::new();
    for level in levels {
        if level.entries.iter().any(|e| e.ratio == 0) {
            return Err(Error::InvalidConfig(format!(
                "level '{}' has an entry with ratio 0",
                level.level
            )));
        }
        let pairs = level.entries.iter().map(|e| (e.item.clone(), e.ratio));
        let level_table = LevelSpawnTable::try_from_pairs(level.level.clone(), pairs)?;
        table.push(level_table);
    }
    Ok(table)
}

fn default_max_pool_size() -> usize {
    DEFAULT_MAX_POOL_SIZE
}

/// Complete spawn setup: level tables, pools and pool behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnSetDef {
    pub levels: Vec<LevelTableDef>,
    #[serde(default)]
    pub pools: Vec<PoolDef>,
    #[serde(default)]
    pub reuse_policy: ReusePolicy,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: usize,
}

impl SpawnSetDef {
    /// Validated selector table keyed by level name.
    pub fn spawn_table(&self) -> Result<SpawnTable<String, String>> {
        build_table(&self.levels)
    }

    pub fn pool_config(&self) -> Result<PoolConfig> {
        let config = PoolConfig::new()
            .with_reuse_policy(self.reuse_policy)
            .with_max_pool_size(self.max_pool_size);
        config.validate()?;
        Ok(config)
    }

    /// Checks ratios, duplicate pool keys and that every entry has a pool.
    pub fn validate(&self) -> Result<()> {
        self.spawn_table()?;
        self.pool_config()?;

        let mut keys = HashSet::new();
        for pool in &self.pools {
            if !keys.insert(pool.key.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "pool '{}' is defined more than once",
                    pool.key
                )));
            }
        }
        for level in &self.levels {
            if let Some(entry) = level
                .entries
                .iter()
                .find(|e| !keys.contains(e.item.as_str()))
            {
                return Err(Error::InvalidConfig(format!(
                    "level '{}' references '{}' but no pool is defined for it",
                    level.level, entry.item
                )));
            }
        }
        Ok(())
    }

    #[cfg(feature = "ron")]
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let def: Self = ron::from_str(text).map_err(|e| Error::Parse(e.to_string()))?;
        def.validate()?;
        Ok(def)
    }

    #[cfg(feature = "ron")]
    pub fn from_ron_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    #[cfg(feature = "ron")]
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::Other(e.to_string()))
    }
}
