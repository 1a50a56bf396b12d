//! Cumulative chance boundaries for ratio-weighted picking.
use crate::selection::table::SpawnEntry;

/// Inclusive integer range `[lower, upper]` owned by one entry.
///
/// Boundaries built by [`build_boundaries`] are contiguous, start at 0 and
/// follow the order of the entries they were built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChanceBoundary<'a, T> {
    pub item: &'a T,
    pub lower: u64,
    pub upper: u64,
}

impl<T> ChanceBoundary<'_, T> {
    #[inline]
    pub fn contains(&self, roll: u64) -> bool {
        (self.lower..=self.upper).contains(&roll)
    }

    #[inline]
    pub fn width(&self) -> u64 {
        self.upper - self.lower + 1
    }
}

/// Lays out one boundary per entry: `[0, r1 - 1]`, `[r1, r1 + r2 - 1]`, ...
pub fn build_boundaries<'a, T: 'a>(
    entries: impl IntoIterator<Item = &'a SpawnEntry<T>>,
) -> Vec<ChanceBoundary<'a, T>> {
    let mut next = 0u64;
    entries
        .into_iter()
        .map(|entry| {
            let lower = next;
            next += entry.weight();
            ChanceBoundary {
                item: &entry.item,
                lower,
                upper: next - 1,
            }
        })
        .collect()
}

/// Sum of all boundary widths.
#[inline]
pub fn total_span<T>(boundaries: &[ChanceBoundary<'_, T>]) -> u64 {
    boundaries.last().map_or(0, |b| b.upper + 1)
}

/// Index of the boundary containing `roll`, if any.
pub fn index_for_roll<T>(boundaries: &[ChanceBoundary<'_, T>], roll: u64) -> Option<usize> {
    let idx = boundaries.partition_point(|b| b.upper < roll);
    boundaries
        .get(idx)
        .filter(|b| b.contains(roll))
        .map(|_| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(ratios: &[u32]) -> Vec<SpawnEntry<usize>> {
        ratios
            .iter()
            .enumerate()
            .map(|(i, r)| SpawnEntry::new(i, *r).unwrap())
            .collect()
    }

    #[test]
    fn boundaries_partition_total_range() {
        for ratios in [&[1u32][..], &[1, 3], &[5, 1, 7, 2], &[100, 1, 1]] {
            let entries = entries(ratios);
            let boundaries = build_boundaries(&entries);
            let total: u64 = ratios.iter().map(|r| u64::from(*r)).sum();

            assert_eq!(boundaries.len(), ratios.len());
            assert_eq!(boundaries[0].lower, 0);
            assert_eq!(total_span(&boundaries), total);
            for pair in boundaries.windows(2) {
                assert_eq!(pair[0].upper + 1, pair[1].lower, "gap or overlap");
            }
            for (b, r) in boundaries.iter().zip(ratios) {
                assert!(b.lower <= b.upper);
                assert_eq!(b.width(), u64::from(*r));
            }
        }
    }

    #[test]
    fn roll_maps_to_owning_entry() {
        let entries = entries(&[2, 3, 1]);
        let boundaries = build_boundaries(&entries);
        let owners: Vec<_> = (0..6)
            .map(|roll| index_for_roll(&boundaries, roll))
            .collect();
        assert_eq!(
            owners,
            vec![Some(0), Some(0), Some(1), Some(1), Some(1), Some(2)]
        );
        assert_eq!(index_for_roll(&boundaries, 6), None);
    }

    #[test]
    fn empty_entries_have_no_span() {
        let entries: Vec<SpawnEntry<usize>> = Vec::new();
        let boundaries = build_boundaries(&entries);
        assert!(boundaries.is_empty());
        assert_eq!(total_span(&boundaries), 0);
        assert_eq!(index_for_roll(&boundaries, 0), None);
    }
}
