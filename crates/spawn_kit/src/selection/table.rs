//! Per-level spawn tables.
use std::num::NonZeroU32;

use crate::error::{Error, Result};

/// An item together with its positive selection ratio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnEntry<T> {
    pub item: T,
    pub ratio: NonZeroU32,
}

impl<T> SpawnEntry<T> {
    /// Creates an entry, rejecting a zero ratio.
    pub fn new(item: T, ratio: u32) -> Result<Self> {
        let Some(ratio) = NonZeroU32::new(ratio) else {
            return Err(Error::InvalidConfig("entry ratio must be > 0".into()));
        };
        Ok(Self { item, ratio })
    }

    /// Ratio widened for summation.
    #[inline]
    pub fn weight(&self) -> u64 {
        u64::from(self.ratio.get())
    }
}

/// Entries registered for one level, in registration order.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSpawnTable<L, T> {
    pub level: L,
    pub entries: Vec<SpawnEntry<T>>,
}

impl<L, T> LevelSpawnTable<L, T> {
    pub fn new(level: L) -> Self {
        Self {
            level,
            entries: Vec::new(),
        }
    }

    /// Builds a table from `(item, ratio)` pairs, failing on the first zero ratio.
    pub fn try_from_pairs<I>(level: L, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, u32)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(item, ratio)| SpawnEntry::new(item, ratio))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { level, entries })
    }

    /// Appends an entry.
    pub fn with_entry(mut self, item: T, ratio: u32) -> Result<Self> {
        self.entries.push(SpawnEntry::new(item, ratio)?);
        Ok(self)
    }

    pub fn push(&mut self, entry: SpawnEntry<T>) {
        self.entries.push(entry);
    }

    pub fn total_ratio(&self) -> u64 {
        self.entries.iter().map(SpawnEntry::weight).sum()
    }
}

/// All level tables a selector draws from.
///
/// Several tables may share a level key; their entries are concatenated in
/// registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnTable<L, T> {
    pub levels: Vec<LevelSpawnTable<L, T>>,
}

impl<L, T> Default for SpawnTable<L, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, T> SpawnTable<L, T> {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    pub fn with_level(mut self, table: LevelSpawnTable<L, T>) -> Self {
        self.levels.push(table);
        self
    }

    pub fn with_levels(mut self, tables: Vec<LevelSpawnTable<L, T>>) -> Self {
        self.levels.extend(tables);
        self
    }

    pub fn push(&mut self, table: LevelSpawnTable<L, T>) {
        self.levels.push(table);
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(|t| t.entries.is_empty())
    }

    /// Every item of every level, in registration order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.levels
            .iter()
            .flat_map(|t| t.entries.iter().map(|e| &e.item))
    }
}

impl<L: PartialEq, T> SpawnTable<L, T> {
    /// Entries registered for `level`, in registration order.
    pub fn entries_for(&self, level: &L) -> Vec<&SpawnEntry<T>> {
        self.levels
            .iter()
            .filter(|t| t.level == *level)
            .flat_map(|t| t.entries.iter())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_ratio_is_rejected() {
        let err = SpawnEntry::new("slime", 0).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = LevelSpawnTable::try_from_pairs(1, [("slime", 2), ("bat", 0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn builder_keeps_registration_order() {
        let table = LevelSpawnTable::new(1)
            .with_entry("slime", 2)
            .and_then(|t| t.with_entry("bat", 5))
            .unwrap();
        let items: Vec<_> = table.entries.iter().map(|e| e.item).collect();
        assert_eq!(items, vec!["slime", "bat"]);
        assert_eq!(table.total_ratio(), 7);
    }

    #[test]
    fn entries_for_concatenates_matching_levels() {
        let table = SpawnTable::new()
            .with_level(LevelSpawnTable::try_from_pairs(1, [("a", 1)]).unwrap())
            .with_level(LevelSpawnTable::try_from_pairs(2, [("b", 1)]).unwrap())
            .with_level(LevelSpawnTable::try_from_pairs(1, [("c", 1)]).unwrap());

        let items: Vec<_> = table.entries_for(&1).iter().map(|e| e.item).collect();
        assert_eq!(items, vec!["a", "c"]);
        assert!(table.entries_for(&3).is_empty());
        assert_eq!(table.items().count(), 3);
    }

    #[test]
    fn table_without_entries_is_empty() {
        let table: SpawnTable<u32, &str> = SpawnTable::new().with_level(LevelSpawnTable::new(1));
        assert!(table.is_empty());
    }
}
