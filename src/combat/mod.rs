pub mod damage;
pub mod engine;
pub mod export_csv;
pub mod report;
pub mod rng;
pub mod validate;

pub use damage::{
    resolve_boss_phase, resolve_player_phase, PlayerPhase, Strike, BOSS_VARIANCE, CRIT_CHANCE,
    CRIT_MULTIPLIER, PLAYER_VARIANCE,
};
pub use engine::{
    health_segments, simulate_raid, simulate_raid_with, BossProfile, Combatant, Outcome,
    RaidConfig, TraceMode, HEALTH_BAR_SEGMENTS, MAX_TURNS, TURN_CAP_LIMIT,
};
pub use export_csv::{export_turns_csv, ExportError};
pub use report::{BattleResult, LogCollector, LogEntry, RaidReport, TurnRecord};
pub use rng::{FixedRoll, RandomSource, Rng, ScriptedRolls};
pub use validate::{validate, validate_config, ValidationError};
