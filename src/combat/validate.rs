use thiserror::Error;

use crate::combat::engine::{BossProfile, Combatant, RaidConfig, TURN_CAP_LIMIT};

/// Rejected raid input. None of these are retryable: they describe the caller's data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("raid roster is empty")]
    EmptyRoster,

    #[error("combatant #{index} ('{name}') is invalid: {reason}")]
    InvalidCombatant {
        index: usize,
        name: String,
        reason: String,
    },

    #[error("boss profile is invalid: {reason}")]
    InvalidBoss { reason: String },

    #[error("raid config is invalid: {reason}")]
    InvalidConfig { reason: String },
}

impl ValidationError {
    /// Stable identifier for API payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyRoster => "empty_roster",
            Self::InvalidCombatant { .. } => "invalid_combatant",
            Self::InvalidBoss { .. } => "invalid_boss",
            Self::InvalidConfig { .. } => "invalid_config",
        }
    }
}

pub fn validate(team: &[Combatant], boss: &BossProfile) -> Result<(), ValidationError> {
    if team.is_empty() {
        return Err(ValidationError::EmptyRoster);
    }

    for (index, combatant) in team.iter().enumerate() {
        let reason = if combatant.attack < 0 {
            Some(format!("attack must be >= 0, got {}", combatant.attack))
        } else if combatant.hp <= 0 {
            Some(format!("hp must be > 0, got {}", combatant.hp))
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(ValidationError::InvalidCombatant {
                index,
                name: combatant.name.clone(),
                reason,
            });
        }
    }

    if boss.attack < 0 {
        return Err(ValidationError::InvalidBoss {
            reason: format!("attack must be >= 0, got {}", boss.attack),
        });
    }
    if boss.health <= 0 {
        return Err(ValidationError::InvalidBoss {
            reason: format!("health must be > 0, got {}", boss.health),
        });
    }

    Ok(())
}

pub fn validate_config(config: &RaidConfig) -> Result<(), ValidationError> {
    if config.max_turns == 0 {
        return Err(ValidationError::InvalidConfig {
            reason: "max_turns must be at least 1".to_string(),
        });
    }
    if config.max_turns > TURN_CAP_LIMIT {
        return Err(ValidationError::InvalidConfig {
            reason: format!(
                "max_turns must be at most {TURN_CAP_LIMIT}, got {}",
                config.max_turns
            ),
        });
    }
    Ok(())
}
