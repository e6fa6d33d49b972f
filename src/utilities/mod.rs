pub mod car;
pub mod config;
pub mod direction;
pub mod dispatcher;
pub mod error;
pub mod fleet;
pub mod logger;
pub mod record;
pub mod request;
pub mod snapshot;
