//! Monte Carlo estimate of how often a roster beats a boss.
//!
//! Iteration `i` runs with seed `seed + i` (wrapping), so any single iteration can be
//! replayed with [crate::combat::simulate_raid]. Tallies are integers, which keeps the
//! parallel estimate identical to the sequential one regardless of chunk order.

use std::ops::Range;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::{
    simulate_raid_with, validate, validate_config, BattleResult, BossProfile, Combatant,
    RaidConfig, Rng, TraceMode, ValidationError,
};
use crate::parallel::batch_ranges;

/// Chunks handed to each Rayon worker.
const CHUNKS_PER_THREAD: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaidEstimate {
    pub iterations: usize,
    pub seed: u64,
    pub wins: u64,
    pub win_rate: f64,
    pub avg_turns: f64,
    pub avg_team_hp_remaining: f64,
    pub avg_boss_hp_remaining: f64,
    pub win_rate_95_ci: [f64; 2],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    runs: u64,
    wins: u64,
    turns: u64,
    team_hp: i128,
    boss_hp: i128,
}

impl Tally {
    fn record(&mut self, result: &BattleResult) {
        self.runs += 1;
        self.wins += u64::from(result.win);
        self.turns += u64::from(result.turns_taken);
        self.team_hp += i128::from(result.final_team_hp);
        self.boss_hp += i128::from(result.final_boss_hp);
    }

    fn merge(self, other: Tally) -> Tally {
        Tally {
            runs: self.runs + other.runs,
            wins: self.wins + other.wins,
            turns: self.turns + other.turns,
            team_hp: self.team_hp + other.team_hp,
            boss_hp: self.boss_hp + other.boss_hp,
        }
    }

    fn into_estimate(self, seed: u64) -> RaidEstimate {
        let mean = |total: f64| {
            if self.runs == 0 {
                0.0
            } else {
                total / self.runs as f64
            }
        };

        RaidEstimate {
            iterations: self.runs as usize,
            seed,
            wins: self.wins,
            win_rate: mean(self.wins as f64),
            avg_turns: mean(self.turns as f64),
            avg_team_hp_remaining: mean(self.team_hp as f64),
            avg_boss_hp_remaining: mean(self.boss_hp as f64),
            win_rate_95_ci: binomial_95_ci(self.wins, self.runs),
        }
    }
}

/// Normal-approximation 95% interval for a win rate, clamped to `[0, 1]`.
pub fn binomial_95_ci(wins: u64, n: u64) -> [f64; 2] {
    if n == 0 {
        return [0.0, 0.0];
    }
    let p = wins as f64 / n as f64;
    let z = 1.96;
    let se = (p * (1.0 - p) / n as f64).sqrt();
    let lo = (p - z * se).max(0.0);
    let hi = (p + z * se).min(1.0);
    [lo, hi]
}

fn tally_range(
    team: &[Combatant],
    boss: &BossProfile,
    config: RaidConfig,
    seed: u64,
    iterations: Range<usize>,
) -> Result<Tally, ValidationError> {
    let mut tally = Tally::default();
    for iteration in iterations {
        let mut rng = Rng::new(seed.wrapping_add(iteration as u64));
        let result = simulate_raid_with(team, boss, config, &mut rng)?;
        tally.record(&result);
    }
    Ok(tally)
}

fn quiet(config: RaidConfig) -> RaidConfig {
    RaidConfig {
        trace_mode: TraceMode::Off,
        ..config
    }
}

pub fn estimate_win_rate(
    team: &[Combatant],
    boss: &BossProfile,
    config: RaidConfig,
    iterations: usize,
    seed: u64,
) -> Result<RaidEstimate, ValidationError> {
    validate(team, boss)?;
    validate_config(&config)?;
    let tally = tally_range(team, boss, quiet(config), seed, 0..iterations)?;
    Ok(tally.into_estimate(seed))
}

/// Like [estimate_win_rate] but spreads iterations across the current Rayon pool.
/// Returns exactly the same estimate as the sequential version.
pub fn estimate_win_rate_parallel(
    team: &[Combatant],
    boss: &BossProfile,
    config: RaidConfig,
    iterations: usize,
    seed: u64,
) -> Result<RaidEstimate, ValidationError> {
    validate(team, boss)?;
    validate_config(&config)?;
    let config = quiet(config);
    let chunks = batch_ranges(
        iterations,
        rayon::current_num_threads().saturating_mul(CHUNKS_PER_THREAD),
    );

    let tally = chunks
        .par_iter()
        .map(|&(start, end)| tally_range(team, boss, config, seed, start..end))
        .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))?;

    tracing::debug!(
        iterations,
        chunks = chunks.len(),
        wins = tally.wins,
        "parallel estimate finished"
    );
    Ok(tally.into_estimate(seed))
}
