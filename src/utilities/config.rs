use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;

use super::error::{Error, Result};

const CONFIG_FILE: &str = "config.json";
const FALLBACK_CONFIG_FILE: &str = "_config.json";

/// Command line flags. Anything given here wins over the configuration file.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "lift-simulator", about = "Multi-car lift bank simulator")]
pub struct Args {
    /// Configuration file to read instead of config.json / _config.json
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of floors in the building
    #[arg(long)]
    pub floors: Option<u8>,

    /// Number of cars in the bank
    #[arg(long)]
    pub cars: Option<u8>,

    /// Do not draw the status table, log to stderr instead
    #[arg(long)]
    pub no_display: bool,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SimulationConfig {
    pub num_floors: u8,
    pub num_cars: u8,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig { num_floors: 10, num_cars: 2 }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TimingConfig {
    pub clock_period_ms: u64,
    pub car_tick_interval_ms: u64,
}

impl TimingConfig {
    pub fn clock_period(&self) -> Duration {
        Duration::from_millis(self.clock_period_ms)
    }

    pub fn car_tick_interval(&self) -> Duration {
        Duration::from_millis(self.car_tick_interval_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig { clock_period_ms: 100, car_tick_interval_ms: 1000 }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AuditConfig {
    pub log_file: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        AuditConfig { log_file: PathBuf::from("lift_logs.csv") }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DebugConfig {
    pub status_display: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        DebugConfig { status_display: true }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub timing: TimingConfig,
    pub audit: AuditConfig,
    pub debug: DebugConfig,
}

impl Config {
    pub fn get(args: &Args) -> Result<Self> {
        let mut config = match read_config_file(args.config.as_deref())? {
            Some(contents) => Config::from_json(&contents)?,
            None => Config::default(),
        };
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Floor and car counts are checked when the fleet is built; this only
    /// covers what the fleet never sees.
    pub fn validate(&self) -> Result<()> {
        if self.timing.clock_period_ms == 0 {
            return Err(Error::Configuration(String::from("timing.clock_period_ms must be at least 1")));
        }
        Ok(())
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(floors) = args.floors {
            self.simulation.num_floors = floors;
        }
        if let Some(cars) = args.cars {
            self.simulation.num_cars = cars;
        }
        if args.no_display {
            self.debug.status_display = false;
        }
    }
}

fn read_config_file(path: Option<&Path>) -> Result<Option<String>> {
    if let Some(path) = path {
        return Ok(Some(fs::read_to_string(path)?));
    }
    match fs::read_to_string(CONFIG_FILE) {
        Ok(contents) => Ok(Some(contents)),
        Err(_) => Ok(fs::read_to_string(FALLBACK_CONFIG_FILE).ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = Config::from_json(r#"{ "simulation": { "num_floors": 6 } }"#).unwrap();
        assert_eq!(config.simulation, SimulationConfig { num_floors: 6, num_cars: 2 });
        assert_eq!(config.timing.car_tick_interval(), Duration::from_secs(1));
        assert_eq!(config.timing.clock_period(), Duration::from_millis(100));
        assert!(config.debug.status_display);
    }

    #[test]
    fn shipped_fallback_file_parses() {
        let contents = include_str!("../../_config.json");
        assert_eq!(Config::from_json(contents).unwrap(), Config::default());
    }

    #[test]
    fn flags_override_the_file() {
        let mut config = Config::default();
        let args = Args { floors: Some(20), cars: Some(4), no_display: true, ..Args::default() };
        config.apply_args(&args);
        assert_eq!(config.simulation, SimulationConfig { num_floors: 20, num_cars: 4 });
        assert!(!config.debug.status_display);
    }

    #[test]
    fn parses_command_line() {
        let args = Args::parse_from(["lift-simulator", "--floors", "12", "--no-display"]);
        assert_eq!(args.floors, Some(12));
        assert_eq!(args.cars, None);
        assert!(args.no_display);
    }

    #[test]
    fn zero_clock_period_is_rejected() {
        let config = Config::from_json(r#"{ "timing": { "clock_period_ms": 0 } }"#).unwrap();
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
        assert!(Config::default().validate().is_ok());

        let path = std::env::temp_dir().join(format!("lift_simulator_config_{}.json", std::process::id()));
        fs::write(&path, r#"{ "timing": { "clock_period_ms": 0, "car_tick_interval_ms": 0 } }"#).unwrap();
        let args = Args { config: Some(path.clone()), ..Args::default() };
        assert!(matches!(Config::get(&args), Err(Error::Configuration(_))));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Config::from_json("{ not json").is_err());
    }
}
