//! Level-aware weighted selection.
//!
//! A [`WeightedSelector`] holds a [`SpawnTable`] of `(item, ratio)` entries bucketed
//! by level. Each call filters the entries to the requested level, lays out
//! contiguous [`ChanceBoundary`] ranges in registration order and draws one
//! uniform integer to pick the owning entry, so an entry is chosen with
//! probability `ratio / total_ratio`.
//!
//! Boundaries are rebuilt on every call; the active level may change between calls.
//! When randomness is required, pass an RNG that implements [rand::RngCore].
use rand::RngCore;

pub mod boundary;
pub mod selector;
pub mod table;

pub use boundary::{build_boundaries, index_for_roll, total_span, ChanceBoundary};
pub use selector::{pick_weighted, Selection, WeightedSelector};
pub use table::{LevelSpawnTable, SpawnEntry, SpawnTable};

/// Draws a uniform integer in `[0, bound)`.
///
/// Uses widening multiplication with rejection, so every value is equally likely.
///
/// # Panics
/// Panics in debug builds if `bound` is 0.
#[inline]
pub fn uniform_below<R: RngCore + ?Sized>(rng: &mut R, bound: u64) -> u64 {
    debug_assert!(bound > 0, "bound must be > 0");
    let mut m = u128::from(rng.next_u64()) * u128::from(bound);
    let mut low = m as u64;
    if low < bound {
        let threshold = bound.wrapping_neg() % bound;
        while low < threshold {
            m = u128::from(rng.next_u64()) * u128::from(bound);
            low = m as u64;
        }
    }
    (m >> 64) as u64
}
