//! Cooperative raid simulator: a roster of combatants against a single boss, resolved
//! turn by turn with seeded randomness.

pub mod cli;
pub mod combat;
pub mod config;
pub mod data;
pub mod estimate;
pub mod parallel;
pub mod server;
pub mod telemetry;
