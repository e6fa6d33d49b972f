use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("floor {floor} is outside the building (0..{num_floors})")]
    InvalidFloor { floor: u8, num_floors: u8 },

    #[error("request from floor {floor} to the same floor")]
    TrivialRequest { floor: u8 },

    #[error("a request needs at least one passenger")]
    InvalidPartySize,

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("the scheduling loop is no longer running")]
    SimulationStopped,

    #[error("file could not be read or written: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration JSON: {0}")]
    ConfigFile(#[from] serde_json::Error),

    #[error("failed to write audit record: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
