//! Work splitting for parallel raid estimates.

use crate::combat::{BossProfile, Combatant, RaidConfig};
use crate::estimate::{estimate_win_rate_parallel, RaidEstimate};
use crate::parallel::pool::{PoolError, WorkerPool};

/// Split `total` items into up to `num_batches` ranges `[start, end)`.
/// Batches are as equal in size as possible; earlier batches take the remainder.
///
/// # Example
/// ```
/// # use raidsim::parallel::batch_ranges;
/// let ranges = batch_ranges(10, 3);
/// assert_eq!(ranges, vec![(0, 4), (4, 7), (7, 10)]);
/// ```
pub fn batch_ranges(total: usize, num_batches: usize) -> Vec<(usize, usize)> {
    if total == 0 || num_batches == 0 {
        return Vec::new();
    }
    let num_batches = num_batches.min(total);
    let base = total / num_batches;
    let remainder = total % num_batches;
    let mut ranges = Vec::with_capacity(num_batches);
    let mut start = 0;
    for i in 0..num_batches {
        let end = start + base + usize::from(i < remainder);
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Runs [estimate_win_rate_parallel] inside `pool`, so the worker count can be pinned.
pub fn run_estimate_batches(
    team: &[Combatant],
    boss: &BossProfile,
    config: RaidConfig,
    iterations: usize,
    seed: u64,
    pool: &WorkerPool,
) -> Result<RaidEstimate, PoolError> {
    let estimate =
        pool.install(|| estimate_win_rate_parallel(team, boss, config, iterations, seed))??;
    Ok(estimate)
}
