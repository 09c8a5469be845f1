//! Runtime settings read from the environment. Engine settings live in [RaidConfig].

use std::env;

use crate::combat::{RaidConfig, MAX_TURNS};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_ESTIMATE_ITERATIONS: usize = 1_000;
pub const MAX_ESTIMATE_ITERATIONS: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// `RAIDSIM_BIND`
    pub bind_addr: String,
    /// `RAIDSIM_MAX_TURNS`; zero is ignored.
    pub max_turns: u32,
    /// `RAIDSIM_WORKERS`; 0 uses every core.
    pub workers: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_turns: MAX_TURNS,
            workers: 0,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(bind_addr) = lookup("RAIDSIM_BIND").filter(|value| !value.trim().is_empty()) {
            config.bind_addr = bind_addr.trim().to_string();
        }
        if let Some(max_turns) = parse_var::<u32>(&lookup, "RAIDSIM_MAX_TURNS") {
            if max_turns > 0 {
                config.max_turns = max_turns;
            }
        }
        if let Some(workers) = parse_var::<usize>(&lookup, "RAIDSIM_WORKERS") {
            config.workers = workers;
        }

        config
    }

    pub fn raid_config(&self) -> RaidConfig {
        RaidConfig {
            max_turns: self.max_turns,
            ..RaidConfig::default()
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable setting");
            None
        }
    }
}
