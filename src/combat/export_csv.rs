//! Per-turn CSV export of a finished raid, for spreadsheet comparison between runs.
//!
//! Columns: turn, player_damage, crits, notable (names joined with `;`), boss_hp,
//! boss_damage (empty on the turn the boss falls), team_hp, outcome (last row only).

use serde::Serialize;
use thiserror::Error;

use crate::combat::report::BattleResult;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv output was not utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Serialize)]
struct TurnRow<'a> {
    turn: u32,
    player_damage: i64,
    crits: usize,
    notable: String,
    boss_hp: i64,
    boss_damage: Option<i64>,
    team_hp: i64,
    outcome: &'a str,
}

pub fn export_turns_csv(result: &BattleResult) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let last_turn = result.turns_taken;

    for record in &result.turns {
        let notable: Vec<&str> = record
            .strikes
            .iter()
            .filter(|strike| strike.crit)
            .map(|strike| strike.name.as_str())
            .collect();
        writer.serialize(TurnRow {
            turn: record.turn,
            player_damage: record.player_damage,
            crits: notable.len(),
            notable: notable.join(";"),
            boss_hp: record.boss_hp,
            boss_damage: record.boss_damage,
            team_hp: record.team_hp,
            outcome: if record.turn == last_turn {
                result.outcome.as_str()
            } else {
                ""
            },
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
