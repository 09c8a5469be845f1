use std::env;

use raidsim::{cli, telemetry};

fn main() {
    telemetry::init();
    let args: Vec<String> = env::args().collect();
    std::process::exit(cli::run_with_args(&args));
}
