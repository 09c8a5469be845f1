//! Raid scenarios on disk: a resolved roster, a boss profile, and optional run settings.
//! `.yaml` / `.yml` files are read as YAML, everything else as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combat::{BossProfile, Combatant, RaidConfig};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidScenario {
    pub team: Vec<Combatant>,
    pub boss: BossProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_turns: Option<u32>,
}

impl RaidScenario {
    /// Applies the scenario's turn cap (if any) on top of `base`.
    pub fn config(&self, base: RaidConfig) -> RaidConfig {
        RaidConfig {
            max_turns: self.max_turns.unwrap_or(base.max_turns),
            ..base
        }
    }
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scenario json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid scenario yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn parse_scenario_json(input: &str) -> Result<RaidScenario, ScenarioError> {
    Ok(serde_json::from_str(input)?)
}

pub fn parse_scenario_yaml(input: &str) -> Result<RaidScenario, ScenarioError> {
    Ok(serde_yaml::from_str(input)?)
}

pub fn load_scenario(path: impl AsRef<Path>) -> Result<RaidScenario, ScenarioError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        parse_scenario_yaml(&raw)
    } else {
        parse_scenario_json(&raw)
    }
}
