use crate::wire::Channel;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum StrikerError {
    #[error("malformed {channel} packet: expected {expected} bytes, got {got}")]
    MalformedPacket {
        channel: Channel,
        expected: usize,
        got: usize,
    },
    #[error("hardware error: {0}")]
    Hardware(String),
    #[error("hardware fault: {0}")]
    HardwareFault(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid state: {0}")]
    State(String),
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing radio set")]
    MissingRadios,
    #[error("missing sensor set")]
    MissingSensors,
    #[error("missing drivetrain motors")]
    MissingDrivetrain,
    #[error("missing robot identity")]
    MissingIdentity,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
