use crate::combat::{
    export_turns_csv, simulate_raid_with, validate, validate_config, RaidConfig, RaidReport, Rng,
};
use crate::config::{ServiceConfig, DEFAULT_ESTIMATE_ITERATIONS, MAX_ESTIMATE_ITERATIONS};
use crate::data::{load_scenario, RaidScenario};
use crate::parallel::{run_estimate_batches, WorkerPool};
use crate::server;
use crate::server::api::SimulateResponse;

const USAGE: &str = "usage: raidsim <serve|simulate|estimate|validate>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Simulate,
    Estimate,
    Validate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
    Csv,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("simulate") => Some(Command::Simulate),
        Some("estimate") => Some(Command::Estimate),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let config = ServiceConfig::from_env();
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(&config),
        Some(Command::Simulate) => handle_simulate(args, &config),
        Some(Command::Estimate) => handle_estimate(args, &config),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

/// Arguments after the subcommand that are not `--flags`.
fn positional(args: &[String]) -> Vec<&String> {
    args.iter()
        .skip(2)
        .filter(|arg| !arg.starts_with("--"))
        .collect()
}

fn load_or_report(path: &str) -> Option<RaidScenario> {
    match load_scenario(path) {
        Ok(scenario) => Some(scenario),
        Err(err) => {
            eprintln!("failed to load scenario: {err}");
            None
        }
    }
}

fn handle_serve(config: &ServiceConfig) -> i32 {
    match server::run_server(config) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_simulate(args: &[String], config: &ServiceConfig) -> i32 {
    let positional = positional(args);
    let Some(path) = positional.first() else {
        eprintln!("usage: raidsim simulate <scenario.json|yaml> [seed] [--text|--csv]");
        return 2;
    };
    let format = if args.iter().any(|arg| arg == "--csv") {
        OutputFormat::Csv
    } else if args.iter().any(|arg| arg == "--text") {
        OutputFormat::Text
    } else {
        OutputFormat::Json
    };

    let Some(scenario) = load_or_report(path) else {
        return 1;
    };
    let seed_arg = parse_u64_arg(positional.get(1).copied(), "seed");
    let (mut rng, seed) = match seed_arg.or(scenario.seed) {
        Some(seed) => (Rng::new(seed), seed),
        None => match Rng::from_entropy() {
            Ok(seeded) => seeded,
            Err(err) => {
                eprintln!("could not seed random source: {err}");
                return 1;
            }
        },
    };

    let result = match simulate_raid_with(
        &scenario.team,
        &scenario.boss,
        scenario.config(config.raid_config()),
        &mut rng,
    ) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("invalid raid: {err}");
            return 1;
        }
    };
    tracing::info!(seed, win = result.win, turns = result.turns_taken, "raid simulated");

    match format {
        OutputFormat::Text => {
            println!("{}", result.render_text());
            0
        }
        OutputFormat::Csv => match export_turns_csv(&result) {
            Ok(csv) => {
                print!("{csv}");
                0
            }
            Err(err) => {
                eprintln!("failed to export csv: {err}");
                1
            }
        },
        OutputFormat::Json => {
            let response = SimulateResponse {
                status: "ok",
                seed,
                report: RaidReport::from(&result),
            };
            match serde_json::to_string_pretty(&response) {
                Ok(payload) => {
                    println!("{payload}");
                    0
                }
                Err(err) => {
                    eprintln!("failed to serialize raid result: {err}");
                    1
                }
            }
        }
    }
}

fn handle_estimate(args: &[String], config: &ServiceConfig) -> i32 {
    let positional = positional(args);
    let Some(path) = positional.first() else {
        eprintln!("usage: raidsim estimate <scenario.json|yaml> [iterations] [seed]");
        return 2;
    };
    let Some(scenario) = load_or_report(path) else {
        return 1;
    };

    let iterations = parse_u64_arg(positional.get(1).copied(), "iterations")
        .map(|value| value as usize)
        .unwrap_or(DEFAULT_ESTIMATE_ITERATIONS)
        .clamp(1, MAX_ESTIMATE_ITERATIONS);
    let seed = parse_u64_arg(positional.get(2).copied(), "seed")
        .or(scenario.seed)
        .unwrap_or(7);

    match run_estimate_batches(
        &scenario.team,
        &scenario.boss,
        scenario.config(config.raid_config()),
        iterations,
        seed,
        &WorkerPool::with_workers(config.workers),
    ) {
        Ok(estimate) => match serde_json::to_string_pretty(&estimate) {
            Ok(payload) => {
                println!("{payload}");
                0
            }
            Err(err) => {
                eprintln!("failed to serialize estimate: {err}");
                1
            }
        },
        Err(err) => {
            eprintln!("estimate failed: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let positional = positional(args);
    let Some(path) = positional.first() else {
        eprintln!("usage: raidsim validate <scenario.json|yaml>");
        return 2;
    };
    let Some(scenario) = load_or_report(path) else {
        return 1;
    };

    let checked = validate(&scenario.team, &scenario.boss)
        .and_then(|()| validate_config(&scenario.config(RaidConfig::default())));
    match checked {
        Ok(()) => {
            println!("validation passed: {path}");
            0
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}

fn parse_u64_arg(raw: Option<&String>, name: &str) -> Option<u64> {
    let value = raw?;
    match value.parse::<u64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            eprintln!("invalid {name} '{value}', using default");
            None
        }
    }
}
