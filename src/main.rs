use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use lift_simulator::modules;
use lift_simulator::utilities::config::{Args, Config};
use lift_simulator::utilities::logger;

fn main() -> ExitCode {
    // READ CONFIGURATION
    let args = Args::parse();
    let config = match Config::get(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Could not load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // INITIALIZE LOGGING
    logger::init(!config.debug.status_display);
    info!("Starting lift simulator with {:?}", config);

    match modules::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Simulator stopped: {}", e);
            eprintln!("Simulator stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}
