//! Criterion settings shared by the selection and pool benches.
#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};

/// Draws rebuild boundaries for the whole level, so runs grow with the table.
pub fn selection_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(30)
        .warm_up_time(Duration::from_millis(750))
        .measurement_time(Duration::from_secs(2))
}

/// Acquire is a hash lookup plus one rotation; short windows with many samples
/// keep the estimate stable.
pub fn acquire_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(100)
        .warm_up_time(Duration::from_millis(300))
        .measurement_time(Duration::from_secs(1))
        .noise_threshold(0.03)
}

/// Boundaries visited by one draw over a level with `per_level` entries.
pub fn entries_per_draw(per_level: usize) -> Throughput {
    Throughput::Elements(per_level.max(1) as u64)
}

/// Instances handed out per iteration of an acquire bench.
pub fn acquires(batch: usize) -> Throughput {
    Throughput::Elements(batch.max(1) as u64)
}
