//! Turn controller for a single raid: a team of combatants against one boss.
//!
//! Each turn the whole roster strikes the boss, then (if it still stands) the boss strikes
//! the team's collective pool. Individual combatant `hp` only gates whether that combatant
//! attacks; it is never reduced here. The raid ends when the boss falls, the pool is
//! spent, or the turn cap runs out. Running out of turns is a loss.

use serde::{Deserialize, Serialize};

use crate::combat::damage::{resolve_boss_phase, resolve_player_phase};
use crate::combat::report::{assemble, BattleResult, LogCollector, LogEntry, TurnRecord};
use crate::combat::rng::RandomSource;
use crate::combat::validate::{validate, validate_config, ValidationError};

pub const MAX_TURNS: u32 = 15;
/// Largest turn cap a caller may request.
pub const TURN_CAP_LIMIT: u32 = 1_000;
pub const HEALTH_BAR_SEGMENTS: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    #[serde(rename = "atk", alias = "attack")]
    pub attack: i64,
    pub hp: i64,
}

impl Combatant {
    pub fn new(name: impl Into<String>, attack: i64, hp: i64) -> Self {
        Self {
            name: name.into(),
            attack,
            hp,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossProfile {
    pub attack: i64,
    pub health: i64,
    /// Accepted and carried, not consulted by turn order.
    #[serde(default)]
    pub speed: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceMode {
    /// Keep per-turn records only; skip the narrative log.
    Off,
    #[default]
    Entries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidConfig {
    pub max_turns: u32,
    pub trace_mode: TraceMode,
}

impl Default for RaidConfig {
    fn default() -> Self {
        Self {
            max_turns: MAX_TURNS,
            trace_mode: TraceMode::Entries,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    BossDefeated,
    TeamDepleted,
    TurnCapExhausted,
}

impl Outcome {
    pub fn is_win(self) -> bool {
        matches!(self, Self::BossDefeated)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BossDefeated => "boss_defeated",
            Self::TeamDepleted => "team_depleted",
            Self::TurnCapExhausted => "turn_cap_exhausted",
        }
    }
}

/// Mutable state of one raid. Lives for a single `simulate_raid_with` call.
#[derive(Debug, Clone)]
pub(crate) struct BattleState {
    pub(crate) turn: u32,
    pub(crate) boss_hp: i64,
    pub(crate) team_hp: i64,
    pub(crate) turns: Vec<TurnRecord>,
}

impl BattleState {
    fn new(team: &[Combatant], boss: &BossProfile, max_turns: u32) -> Self {
        Self {
            turn: 0,
            boss_hp: boss.health,
            team_hp: team
                .iter()
                .fold(0_i64, |pool, combatant| pool.saturating_add(combatant.hp)),
            turns: Vec::with_capacity(max_turns.min(MAX_TURNS) as usize),
        }
    }

    fn settled(&self, max_turns: u32) -> Option<Outcome> {
        if self.boss_hp <= 0 {
            Some(Outcome::BossDefeated)
        } else if self.team_hp <= 0 {
            Some(Outcome::TeamDepleted)
        } else if self.turn >= max_turns {
            Some(Outcome::TurnCapExhausted)
        } else {
            None
        }
    }
}

/// Segments of a fixed-width boss health bar, truncated toward zero and clamped to `0..=10`.
pub fn health_segments(boss_hp: i64, max_health: i64) -> u8 {
    if max_health <= 0 {
        return 0;
    }
    let ratio = boss_hp as f64 / max_health as f64;
    (ratio * f64::from(HEALTH_BAR_SEGMENTS))
        .trunc()
        .clamp(0.0, f64::from(HEALTH_BAR_SEGMENTS)) as u8
}

/// Runs a raid with the default 15-turn cap and a full log.
pub fn simulate_raid<R: RandomSource + ?Sized>(
    team: &[Combatant],
    boss: &BossProfile,
    rng: &mut R,
) -> Result<BattleResult, ValidationError> {
    simulate_raid_with(team, boss, RaidConfig::default(), rng)
}

pub fn simulate_raid_with<R: RandomSource + ?Sized>(
    team: &[Combatant],
    boss: &BossProfile,
    config: RaidConfig,
    rng: &mut R,
) -> Result<BattleResult, ValidationError> {
    validate(team, boss)?;
    validate_config(&config)?;

    let mut state = BattleState::new(team, boss, config.max_turns);
    let mut log = LogCollector::new(config.trace_mode == TraceMode::Entries);

    let outcome = loop {
        if let Some(outcome) = state.settled(config.max_turns) {
            break outcome;
        }

        state.turn += 1;
        let turn = state.turn;
        log.record(LogEntry::TurnStart { turn });

        let phase = resolve_player_phase(team, rng);
        state.boss_hp = state.boss_hp.saturating_sub(phase.total);
        let segments = health_segments(state.boss_hp, boss.health);
        log.record(LogEntry::TeamAttack {
            damage: phase.total,
            boss_hp: state.boss_hp.max(0),
            health_segments: segments,
        });
        let notable = phase.notable();
        if !notable.is_empty() {
            log.record(LogEntry::Notable { names: notable });
        }
        tracing::debug!(
            turn,
            player_damage = phase.total,
            boss_hp = state.boss_hp,
            "player phase resolved"
        );

        // A fallen boss does not retaliate.
        let boss_damage = if state.boss_hp > 0 {
            let damage = resolve_boss_phase(boss, rng);
            state.team_hp = state.team_hp.saturating_sub(damage);
            log.record(LogEntry::BossAttack { damage });
            tracing::debug!(
                turn,
                boss_damage = damage,
                team_hp = state.team_hp,
                "boss phase resolved"
            );
            Some(damage)
        } else {
            None
        };

        state.turns.push(TurnRecord {
            turn,
            player_damage: phase.total,
            strikes: phase.strikes,
            boss_hp: state.boss_hp.max(0),
            health_segments: segments,
            boss_damage,
            team_hp: state.team_hp.max(0),
        });
    };

    tracing::debug!(
        outcome = outcome.as_str(),
        turns = state.turn,
        boss_hp = state.boss_hp,
        team_hp = state.team_hp,
        "raid settled"
    );

    Ok(assemble(outcome, state, log))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::rng::FixedRoll;

    #[test]
    fn health_segments_track_remaining_fraction() {
        assert_eq!(health_segments(2000, 2000), 10);
        assert_eq!(health_segments(1136, 2000), 5);
        assert_eq!(health_segments(199, 2000), 0);
    }

    #[test]
    fn health_segments_clamp_overshoot() {
        assert_eq!(health_segments(-5000, 2000), 0);
        assert_eq!(health_segments(9000, 2000), 10);
        assert_eq!(health_segments(10, 0), 0);
    }

    #[test]
    fn defeated_boss_skips_its_phase() {
        let team = [Combatant::new("A", 100, 10)];
        let boss = BossProfile {
            attack: 1_000,
            health: 50,
            speed: 0,
        };
        let mut roll = FixedRoll::MIDPOINT;
        let result = simulate_raid(&team, &boss, &mut roll).unwrap();

        assert!(result.win);
        assert_eq!(result.outcome, Outcome::BossDefeated);
        assert_eq!(result.turns_taken, 1);
        assert_eq!(result.final_team_hp, 10);
        assert_eq!(result.turns[0].boss_damage, None);
    }

    #[test]
    fn zero_turn_cap_fails_validation() {
        let team = [Combatant::new("A", 1, 1)];
        let boss = BossProfile {
            attack: 1,
            health: 1,
            speed: 0,
        };
        let config = RaidConfig {
            max_turns: 0,
            trace_mode: TraceMode::Off,
        };
        let mut roll = FixedRoll::MIDPOINT;
        assert!(simulate_raid_with(&team, &boss, config, &mut roll).is_err());
    }
}
