//! Run the raid simulator in a loop and optionally append one line to a log file for trend tracking.
//!
//! Usage:
//!   cargo run --release --bin benchmark_simulator
//!   cargo run --release --bin benchmark_simulator -- --log
//!
//! --log  Append one row to benchmark_log.csv (date, raids_per_sec, raids_per_min, turns_per_sec, avg_turns).

use std::fs::OpenOptions;
use std::io::Write;
use std::time::Instant;

use raidsim::combat::{simulate_raid_with, BossProfile, Combatant, RaidConfig, Rng, TraceMode};

const LOG_PATH: &str = "benchmark_log.csv";

fn main() -> std::io::Result<()> {
    raidsim::telemetry::init();
    let log = std::env::args().any(|a| a == "--log");

    let team: Vec<Combatant> = (0..8)
        .map(|i| Combatant::new(format!("member_{i}"), 90 + i * 10, 400))
        .collect();
    let boss = BossProfile {
        attack: 180,
        health: 9_000,
        speed: 10,
    };
    let config = RaidConfig {
        trace_mode: TraceMode::Off,
        ..RaidConfig::default()
    };

    // Run for at least this long or this many raids
    const MIN_DURATION_MS: u128 = 2000;
    const MIN_RAIDS: u64 = 5_000;

    let start = Instant::now();
    let mut raids: u64 = 0;
    let mut turns: u64 = 0;
    while start.elapsed().as_millis() < MIN_DURATION_MS || raids < MIN_RAIDS {
        let mut rng = Rng::new(raids);
        match simulate_raid_with(&team, &boss, config, &mut rng) {
            Ok(result) => turns += u64::from(result.turns_taken),
            Err(err) => {
                eprintln!("benchmark scenario rejected: {err}");
                std::process::exit(1);
            }
        }
        raids += 1;
    }
    let elapsed_secs = start.elapsed().as_secs_f64();

    let raids_per_sec = raids as f64 / elapsed_secs;
    let raids_per_min = raids_per_sec * 60.0;
    let turns_per_sec = turns as f64 / elapsed_secs;
    let avg_turns = turns as f64 / raids as f64;

    println!("Raid simulator benchmark ({} combatants):", team.len());
    println!("  Raids:       {}", raids);
    println!("  Duration:    {:.2} s", elapsed_secs);
    println!("  Raids/s:     {:.2}", raids_per_sec);
    println!("  Raids/min:   {:.2}", raids_per_min);
    println!("  Turns/s:     {:.2}", turns_per_sec);
    println!("  Avg turns:   {:.2}", avg_turns);

    if log {
        let date = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let line = format!(
            "{},{:.4},{:.4},{:.4},{:.4}\n",
            date, raids_per_sec, raids_per_min, turns_per_sec, avg_turns
        );
        let mut file = OpenOptions::new().create(true).append(true).open(LOG_PATH)?;
        if file.metadata().map(|m| m.len() == 0).unwrap_or(true) {
            file.write_all(b"date,raids_per_sec,raids_per_min,turns_per_sec,avg_turns\n")?;
        }
        file.write_all(line.as_bytes())?;
        file.flush()?;
        println!("Appended to {}", LOG_PATH);
    }

    Ok(())
}
