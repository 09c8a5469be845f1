use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combat::{simulate_raid_with, RaidReport, Rng, ValidationError};
use crate::config::{ServiceConfig, DEFAULT_ESTIMATE_ITERATIONS, MAX_ESTIMATE_ITERATIONS};
use crate::data::RaidScenario;
use crate::estimate::RaidEstimate;
use crate::parallel::pool::PoolError;
use crate::parallel::{run_estimate_batches, WorkerPool};

#[derive(Debug, Clone, Deserialize)]
pub struct EstimateRequest {
    #[serde(flatten)]
    pub scenario: RaidScenario,
    pub iterations: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulateResponse {
    pub status: &'static str,
    pub seed: u64,
    #[serde(flatten)]
    pub report: RaidReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct EstimateResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub estimate: RaidEstimate,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("could not seed random source: {0}")]
    Entropy(#[from] getrandom::Error),
    #[error("{0}")]
    Pool(PoolError),
}

impl From<PoolError> for ApiError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::Validation(err) => Self::Validation(err),
            other => Self::Pool(other),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub status: &'static str,
    pub kind: &'static str,
    pub message: String,
}

impl From<&ValidationError> for ValidationErrorResponse {
    fn from(err: &ValidationError) -> Self {
        Self {
            status: "error",
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "raidsim-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

fn seeded_rng(seed: Option<u64>) -> Result<(Rng, u64), getrandom::Error> {
    match seed {
        Some(seed) => Ok((Rng::new(seed), seed)),
        None => Rng::from_entropy(),
    }
}

pub fn simulate_payload(body: &str, config: &ServiceConfig) -> Result<String, ApiError> {
    let scenario: RaidScenario = serde_json::from_str(body)?;
    let (mut rng, seed) = seeded_rng(scenario.seed)?;

    let result = simulate_raid_with(
        &scenario.team,
        &scenario.boss,
        scenario.config(config.raid_config()),
        &mut rng,
    )?;

    let response = SimulateResponse {
        status: "ok",
        seed,
        report: RaidReport::from(&result),
    };
    Ok(serde_json::to_string_pretty(&response)?)
}

pub fn estimate_payload(body: &str, config: &ServiceConfig) -> Result<String, ApiError> {
    let request: EstimateRequest = serde_json::from_str(body)?;
    let iterations = request
        .iterations
        .unwrap_or(DEFAULT_ESTIMATE_ITERATIONS)
        .clamp(1, MAX_ESTIMATE_ITERATIONS);
    let (_, seed) = seeded_rng(request.scenario.seed)?;

    let estimate = run_estimate_batches(
        &request.scenario.team,
        &request.scenario.boss,
        request.scenario.config(config.raid_config()),
        iterations,
        seed,
        &WorkerPool::with_workers(config.workers),
    )?;

    let response = EstimateResponse {
        status: "ok",
        estimate,
    };
    Ok(serde_json::to_string_pretty(&response)?)
}
