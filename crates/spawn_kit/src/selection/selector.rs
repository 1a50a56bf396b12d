use std::fmt::Display;

use rand::RngCore;
use tracing::debug;

use crate::error::Result;
use crate::events::{EventSink, SpawnEvent, SpawnEventKind};
use crate::level::LevelProvider;
use crate::selection::boundary::{build_boundaries, index_for_roll, total_span, ChanceBoundary};
use crate::selection::table::{LevelSpawnTable, SpawnEntry, SpawnTable};
use crate::selection::uniform_below;

/// Outcome of a successful weighted draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a, T> {
    /// The chosen item.
    pub item: &'a T,
    /// Index of the chosen entry among the level's entries.
    pub index: usize,
    /// The uniform draw in `[0, total_ratio)`.
    pub roll: u64,
    /// Sum of ratios of the level's entries.
    pub total_ratio: u64,
}

/// Picks one entry with probability proportional to its ratio.
///
/// Returns `None` for an empty slice.
pub fn pick_weighted<'a, T, R: RngCore + ?Sized>(
    entries: &'a [SpawnEntry<T>],
    rng: &mut R,
) -> Option<&'a T> {
    draw(entries.iter(), rng).map(|s| s.item)
}

fn draw<'a, T: 'a, R: RngCore + ?Sized>(
    entries: impl IntoIterator<Item = &'a SpawnEntry<T>>,
    rng: &mut R,
) -> Option<Selection<'a, T>> {
    let boundaries = build_boundaries(entries);
    let total_ratio = total_span(&boundaries);
    if total_ratio == 0 {
        return None;
    }

    let roll = uniform_below(rng, total_ratio);
    let index = index_for_roll(&boundaries, roll)?;
    Some(Selection {
        item: boundaries[index].item,
        index,
        roll,
        total_ratio,
    })
}

/// Ratio-weighted picker scoped by level.
#[derive(Debug, Clone)]
pub struct WeightedSelector<L, T> {
    table: SpawnTable<L, T>,
}

impl<L, T> From<SpawnTable<L, T>> for WeightedSelector<L, T> {
    fn from(table: SpawnTable<L, T>) -> Self {
        Self::new(table)
    }
}

impl<L, T> WeightedSelector<L, T> {
    pub fn new(table: SpawnTable<L, T>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SpawnTable<L, T> {
        &self.table
    }

    /// Every item the selector can ever return, in registration order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.table.items()
    }

    /// Level keys in registration order. A key registered twice appears twice.
    pub fn levels(&self) -> impl Iterator<Item = &L> {
        self.table.levels.iter().map(|t| &t.level)
    }
}

impl<L: PartialEq, T> WeightedSelector<L, T> {
    /// Builds a selector from `(level, item, ratio)` triples.
    ///
    /// Consecutive triples for the same level share one level table. Fails with
    /// [`crate::error::Error::InvalidConfig`] on the first zero ratio.
    pub fn try_from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, T, u32)>,
    {
        let mut table = SpawnTable::new();
        for (level, item, ratio) in entries {
            let entry = SpawnEntry::new(item, ratio)?;
            match table.levels.last_mut() {
                Some(last) if last.level == level => last.push(entry),
                _ => {
                    let mut level_table = LevelSpawnTable::new(level);
                    level_table.push(entry);
                    table.push(level_table);
                }
            }
        }
        Ok(Self::new(table))
    }

    /// Boundaries for `level`, rebuilt from the table on every call.
    pub fn boundaries(&self, level: &L) -> Vec<ChanceBoundary<'_, T>> {
        build_boundaries(self.table.entries_for(level))
    }

    pub fn total_ratio(&self, level: &L) -> u64 {
        self.table
            .entries_for(level)
            .into_iter()
            .map(SpawnEntry::weight)
            .sum()
    }

    /// Draws one item registered for `level`; `None` if the level has no entries.
    pub fn get_item<R: RngCore + ?Sized>(&self, level: &L, rng: &mut R) -> Option<&T> {
        self.select(level, rng).map(|s| s.item)
    }

    /// Like [`Self::get_item`], but reports roll and index as well.
    pub fn select<R: RngCore + ?Sized>(&self, level: &L, rng: &mut R) -> Option<Selection<'_, T>> {
        draw(self.table.entries_for(level), rng)
    }

    /// Draws for whatever level `provider` reports as current.
    pub fn get_item_from<P, R>(&self, provider: &P, rng: &mut R) -> Option<&T>
    where
        P: LevelProvider<L> + ?Sized,
        R: RngCore + ?Sized,
    {
        let level = provider.current_level();
        self.get_item(&level, rng)
    }
}

impl<L: PartialEq + Display, T> WeightedSelector<L, T> {
    pub fn get_item_with_events<R: RngCore + ?Sized>(
        &self,
        level: &L,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Option<&T> {
        self.select_with_events(level, rng, sink).map(|s| s.item)
    }

    pub(crate) fn select_with_events<R: RngCore + ?Sized>(
        &self,
        level: &L,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Option<Selection<'_, T>> {
        match self.select(level, rng) {
            Some(selection) => {
                if sink.wants(SpawnEventKind::ItemSelected) {
                    sink.send(SpawnEvent::ItemSelected {
                        level: level.to_string(),
                        index: selection.index,
                        roll: selection.roll,
                        total_ratio: selection.total_ratio,
                    });
                }
                Some(selection)
            }
            None => {
                debug!("Level '{}' has no spawn entries.", level);
                if sink.wants(SpawnEventKind::SelectionEmpty) {
                    sink.send(SpawnEvent::SelectionEmpty {
                        level: level.to_string(),
                    });
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::events::VecSink;
    use crate::level::LevelCell;

    struct FixedRng {
        value: u64,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.value
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 8];
            }
        }
    }

    fn two_level_selector() -> WeightedSelector<&'static str, &'static str> {
        WeightedSelector::new(
            SpawnTable::new()
                .with_level(
                    LevelSpawnTable::try_from_pairs("A", [("slime", 1), ("bat", 3)]).unwrap(),
                )
                .with_level(LevelSpawnTable::try_from_pairs("B", [("golem", 1)]).unwrap()),
        )
    }

    #[test]
    fn fixed_rolls_select_by_boundary() {
        let selector = two_level_selector();

        // total 4 is a power of two, so the draw is the top two bits
        let mut first = FixedRng { value: 0 };
        assert_eq!(selector.get_item(&"A", &mut first), Some(&"slime"));

        let mut second = FixedRng { value: 1 << 62 };
        let selection = selector.select(&"A", &mut second).unwrap();
        assert_eq!(selection.item, &"bat");
        assert_eq!(selection.roll, 1);
        assert_eq!(selection.index, 1);
        assert_eq!(selection.total_ratio, 4);

        let mut last = FixedRng { value: u64::MAX };
        assert_eq!(selector.get_item(&"A", &mut last), Some(&"bat"));
    }

    #[test]
    fn ratios_drive_probability() {
        let selector = two_level_selector();
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let n = 100_000;
        let mut slime = 0u32;
        let mut bat = 0u32;
        for _ in 0..n {
            match selector.get_item(&"A", &mut rng) {
                Some(&"slime") => slime += 1,
                Some(&"bat") => bat += 1,
                other => panic!("unexpected selection {other:?}"),
            }
        }
        let ratio = f64::from(bat) / f64::from(slime);
        assert!((ratio - 3.0).abs() < 0.3, "bat/slime ratio was {ratio}");
    }

    #[test]
    fn selection_is_scoped_to_level() {
        let selector = two_level_selector();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1_000 {
            let item = selector.get_item(&"A", &mut rng).unwrap();
            assert_ne!(*item, "golem");
            assert_eq!(selector.get_item(&"B", &mut rng), Some(&"golem"));
        }
    }

    #[test]
    fn unknown_level_yields_none() {
        let selector = two_level_selector();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(selector.get_item(&"C", &mut rng).is_none());
        assert_eq!(selector.total_ratio(&"C"), 0);
        assert!(selector.boundaries(&"C").is_empty());
    }

    #[test]
    fn provider_supplies_level() {
        let selector = two_level_selector();
        let mut cell = LevelCell::new("B");
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(selector.get_item_from(&cell, &mut rng), Some(&"golem"));

        cell.set("C");
        assert!(selector.get_item_from(&cell, &mut rng).is_none());
    }

    #[test]
    fn events_report_selection_and_empty_levels() {
        let selector = two_level_selector();
        let mut rng = FixedRng { value: 0 };
        let mut sink = VecSink::new();

        selector.get_item_with_events(&"A", &mut rng, &mut sink);
        selector.get_item_with_events(&"C", &mut rng, &mut sink);

        assert_eq!(
            sink.into_inner(),
            vec![
                SpawnEvent::ItemSelected {
                    level: "A".into(),
                    index: 0,
                    roll: 0,
                    total_ratio: 4,
                },
                SpawnEvent::SelectionEmpty { level: "C".into() },
            ]
        );
    }

    #[test]
    fn pick_weighted_handles_plain_slices() {
        let entries = vec![SpawnEntry::new('x', 2).unwrap()];
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(pick_weighted(&entries, &mut rng), Some(&'x'));

        let empty: Vec<SpawnEntry<char>> = Vec::new();
        assert_eq!(pick_weighted(&empty, &mut rng), None);
    }

    #[test]
    fn levels_and_items_follow_registration_order() {
        let selector = two_level_selector();
        assert_eq!(
            selector.levels().copied().collect::<Vec<_>>(),
            vec!["A", "B"]
        );
        assert_eq!(
            selector.items().copied().collect::<Vec<_>>(),
            vec!["slime", "bat", "golem"]
        );
    }

    #[test]
    fn entries_build_level_tables() {
        let entries = [("A", "slime", 1), ("A", "bat", 3), ("B", "golem", 2)];
        let selector = WeightedSelector::try_from_entries(entries).unwrap();
        assert_eq!(selector.table().levels.len(), 2);
        assert_eq!(selector.total_ratio(&"A"), 4);
        assert_eq!(selector.total_ratio(&"B"), 2);

        let mut rng = FixedRng { value: u64::MAX };
        assert_eq!(selector.get_item(&"A", &mut rng), Some(&"bat"));
    }

    #[test]
    fn entries_with_zero_ratio_are_rejected() {
        let entries = [("A", "slime", 1), ("B", "ghost", 0)];
        let err = WeightedSelector::try_from_entries(entries).unwrap_err();
        assert!(matches!(err, crate::error::Error::InvalidConfig(_)));
    }
}
