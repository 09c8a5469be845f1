pub mod scenario;

pub use scenario::{
    load_scenario, parse_scenario_json, parse_scenario_yaml, RaidScenario, ScenarioError,
};
