//! Raid results: structured per-turn records, the narrative log, and its text rendering.
//!
//! The structured [LogEntry] values are authoritative. Text lines are derived from them with
//! [LogEntry::render], so a presentation layer can re-render without losing counts.

use serde::{Deserialize, Serialize};

use crate::combat::damage::Strike;
use crate::combat::engine::{BattleState, Outcome, HEALTH_BAR_SEGMENTS};

const BAR_BLOCK: char = '█';

/// What happened in one turn. Pool values are post-phase and clamped at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub player_damage: i64,
    pub strikes: Vec<Strike>,
    pub boss_hp: i64,
    pub health_segments: u8,
    /// `None` when the boss fell during this turn's player phase.
    pub boss_damage: Option<i64>,
    pub team_hp: i64,
}

impl TurnRecord {
    pub fn crit_count(&self) -> usize {
        self.strikes.iter().filter(|strike| strike.crit).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEntry {
    TurnStart {
        turn: u32,
    },
    TeamAttack {
        damage: i64,
        boss_hp: i64,
        health_segments: u8,
    },
    Notable {
        names: Vec<String>,
    },
    BossAttack {
        damage: i64,
    },
    Conclusion {
        win: bool,
    },
}

impl LogEntry {
    pub fn render(&self) -> String {
        match self {
            Self::TurnStart { turn } => format!("**Turn {turn}**"),
            Self::TeamAttack {
                damage,
                boss_hp,
                health_segments,
            } => format!(
                "Team dealt **{}** dmg! Boss: `{}` ({})",
                group_thousands(*damage),
                health_bar(*health_segments),
                group_thousands(*boss_hp)
            ),
            Self::Notable { names } => {
                let crits: Vec<String> = names
                    .iter()
                    .map(|name| format!("{name} **CRIT!**"))
                    .collect();
                format!("Notable: {}", crits.join(", "))
            }
            Self::BossAttack { damage } => {
                format!("👹 Boss attacked for **{}** damage!", group_thousands(*damage))
            }
            Self::Conclusion { win: true } => "\n🏆 **VICTORY**".to_string(),
            Self::Conclusion { win: false } => "\n💀 **DEFEAT**".to_string(),
        }
    }
}

/// Collects log entries when enabled; a disabled collector drops everything.
#[derive(Debug, Clone, Default)]
pub struct LogCollector {
    enabled: bool,
    entries: Vec<LogEntry>,
}

impl LogCollector {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn record(&mut self, entry: LogEntry) {
        if self.enabled {
            self.entries.push(entry);
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub win: bool,
    pub outcome: Outcome,
    pub turns_taken: u32,
    pub final_boss_hp: i64,
    pub final_team_hp: i64,
    pub turns: Vec<TurnRecord>,
    pub log: Vec<LogEntry>,
}

impl BattleResult {
    pub fn total_crits(&self) -> usize {
        self.turns.iter().map(TurnRecord::crit_count).sum()
    }

    pub fn render_lines(&self) -> Vec<String> {
        self.log.iter().map(LogEntry::render).collect()
    }

    pub fn render_text(&self) -> String {
        self.render_lines().join("\n")
    }
}

/// Folds the finished state into a [BattleResult] and closes the log.
pub(crate) fn assemble(outcome: Outcome, state: BattleState, mut log: LogCollector) -> BattleResult {
    let win = state.boss_hp <= 0;
    debug_assert_eq!(win, outcome.is_win());
    log.record(LogEntry::Conclusion { win });

    BattleResult {
        win,
        outcome,
        turns_taken: state.turn,
        final_boss_hp: state.boss_hp.max(0),
        final_team_hp: state.team_hp.max(0),
        turns: state.turns,
        log: log.into_entries(),
    }
}

/// Wire shape for callers that want the narrative as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidReport {
    pub win: bool,
    pub outcome: Outcome,
    pub turns_taken: u32,
    pub final_boss_hp: i64,
    pub final_team_hp: i64,
    pub log: Vec<String>,
    pub turns: Vec<TurnRecord>,
}

impl From<&BattleResult> for RaidReport {
    fn from(result: &BattleResult) -> Self {
        Self {
            win: result.win,
            outcome: result.outcome,
            turns_taken: result.turns_taken,
            final_boss_hp: result.final_boss_hp,
            final_team_hp: result.final_team_hp,
            log: result.render_lines(),
            turns: result.turns.clone(),
        }
    }
}

pub fn health_bar(segments: u8) -> String {
    std::iter::repeat(BAR_BLOCK)
        .take(usize::from(segments.min(HEALTH_BAR_SEGMENTS)))
        .collect()
}

/// `1234567` -> `1,234,567`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_thousands_inserts_separators() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-12_345), "-12,345");
    }

    #[test]
    fn health_bar_never_exceeds_width() {
        assert_eq!(health_bar(0), "");
        assert_eq!(health_bar(3), "███");
        assert_eq!(health_bar(200).chars().count(), 10);
    }

    #[test]
    fn entries_render_narrative_lines() {
        assert_eq!(LogEntry::TurnStart { turn: 3 }.render(), "**Turn 3**");
        assert_eq!(
            LogEntry::TeamAttack {
                damage: 1_440,
                boss_hp: 560,
                health_segments: 2,
            }
            .render(),
            "Team dealt **1,440** dmg! Boss: `██` (560)"
        );
        assert_eq!(
            LogEntry::Notable {
                names: vec!["A".to_string(), "B".to_string()],
            }
            .render(),
            "Notable: A **CRIT!**, B **CRIT!**"
        );
        assert_eq!(
            LogEntry::BossAttack { damage: 150 }.render(),
            "👹 Boss attacked for **150** damage!"
        );
        assert!(LogEntry::Conclusion { win: false }.render().ends_with("**DEFEAT**"));
    }

    #[test]
    fn disabled_collector_drops_entries() {
        let mut on = LogCollector::new(true);
        on.record(LogEntry::TurnStart { turn: 1 });
        assert_eq!(on.entries().len(), 1);

        let mut off = LogCollector::new(false);
        off.record(LogEntry::TurnStart { turn: 1 });
        assert!(off.entries().is_empty());
    }

    #[test]
    fn log_entries_serialize_with_kind_tag() {
        let json = serde_json::to_value(LogEntry::BossAttack { damage: 7 }).expect("serializable");
        assert_eq!(json, serde_json::json!({"kind": "boss_attack", "damage": 7}));
    }
}
