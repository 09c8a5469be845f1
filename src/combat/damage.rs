use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::combat::engine::{BossProfile, Combatant};
use crate::combat::rng::RandomSource;

pub const PLAYER_VARIANCE: RangeInclusive<f64> = 0.6..=1.0;
pub const BOSS_VARIANCE: RangeInclusive<f64> = 0.8..=1.2;
pub const CRIT_CHANCE: f64 = 0.15;
pub const CRIT_MULTIPLIER: f64 = 1.5;

/// One combatant's contribution to a player phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strike {
    pub name: String,
    pub damage: i64,
    pub crit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerPhase {
    pub total: i64,
    pub strikes: Vec<Strike>,
}

impl PlayerPhase {
    /// Names of combatants that landed a crit, in roster order.
    pub fn notable(&self) -> Vec<String> {
        self.strikes
            .iter()
            .filter(|strike| strike.crit)
            .map(|strike| strike.name.clone())
            .collect()
    }
}

/// Maps a unit draw onto `range`.
#[inline]
pub fn variance(range: &RangeInclusive<f64>, draw: f64) -> f64 {
    range.start() + draw * (range.end() - range.start())
}

/// `floor(value * factor)`, never negative.
#[inline]
pub fn scale(value: i64, factor: f64) -> i64 {
    ((value as f64) * factor).floor().max(0.0) as i64
}

/// Rolls every alive combatant: a variance draw, then a crit draw.
pub fn resolve_player_phase<R: RandomSource + ?Sized>(
    team: &[Combatant],
    rng: &mut R,
) -> PlayerPhase {
    let mut phase = PlayerPhase {
        total: 0,
        strikes: Vec::with_capacity(team.len()),
    };

    for combatant in team.iter().filter(|combatant| combatant.is_alive()) {
        let base = scale(
            combatant.attack,
            variance(&PLAYER_VARIANCE, rng.next_unit()),
        );
        let crit = rng.next_unit() < CRIT_CHANCE;
        let damage = if crit {
            scale(base, CRIT_MULTIPLIER)
        } else {
            base
        };

        phase.total = phase.total.saturating_add(damage);
        phase.strikes.push(Strike {
            name: combatant.name.clone(),
            damage,
            crit,
        });
    }

    phase
}

/// Single roll against the collective pool.
pub fn resolve_boss_phase<R: RandomSource + ?Sized>(boss: &BossProfile, rng: &mut R) -> i64 {
    scale(boss.attack, variance(&BOSS_VARIANCE, rng.next_unit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::rng::{FixedRoll, ScriptedRolls};

    fn member(name: &str, attack: i64) -> Combatant {
        Combatant {
            name: name.to_string(),
            attack,
            hp: 100,
        }
    }

    #[test]
    fn variance_maps_range_endpoints() {
        assert_eq!(variance(&PLAYER_VARIANCE, 0.0), 0.6);
        assert_eq!(variance(&PLAYER_VARIANCE, 0.5), 0.8);
        assert_eq!(variance(&BOSS_VARIANCE, 0.5), 1.0);
    }

    #[test]
    fn scale_floors_and_never_goes_negative() {
        assert_eq!(scale(99, 0.6), 59);
        assert_eq!(scale(0, 1.2), 0);
        assert_eq!(scale(-10, 1.0), 0);
    }

    #[test]
    fn crit_applies_after_variance_truncation() {
        // variance draw 0.5 -> 0.8, crit draw 0.0 -> crit
        let mut rolls = ScriptedRolls::new([0.5, 0.0]);
        let phase = resolve_player_phase(&[member("A", 101)], &mut rolls);
        // floor(101 * 0.8) = 80, floor(80 * 1.5) = 120
        assert_eq!(phase.total, 120);
        assert_eq!(phase.notable(), vec!["A".to_string()]);
    }

    #[test]
    fn crit_threshold_is_exclusive() {
        let mut rolls = ScriptedRolls::new([0.5, CRIT_CHANCE]);
        let phase = resolve_player_phase(&[member("A", 100)], &mut rolls);
        assert_eq!(phase.total, 80);
        assert!(phase.notable().is_empty());
    }

    #[test]
    fn dead_combatants_do_not_draw() {
        let mut rolls = ScriptedRolls::new([0.5, 0.9]);
        let mut fallen = member("Fallen", 500);
        fallen.hp = 0;
        let phase = resolve_player_phase(&[fallen, member("B", 50)], &mut rolls);
        assert_eq!(phase.strikes.len(), 1);
        assert_eq!(phase.total, 40);
        assert_eq!(rolls.consumed(), 2);
    }

    #[test]
    fn boss_phase_uses_narrow_band() {
        let boss = BossProfile {
            attack: 150,
            health: 1,
            speed: 0,
        };
        let mut midpoint = FixedRoll::MIDPOINT;
        assert_eq!(resolve_boss_phase(&boss, &mut midpoint), 150);
        assert_eq!(resolve_boss_phase(&boss, &mut FixedRoll::new(0.0)), 120);
    }
}
