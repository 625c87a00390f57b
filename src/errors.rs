use thiserror::Error;

use crate::cost::{DeliveryMode, ZoneType};


#[derive(Error, Debug)]
pub enum RouteError {
    #[error("unknown node: {0}")]
    UnknownNode(String), // start or end is not a key of the graph
    #[error("invalid edge length {length} on {from} -> {to}")]
    InvalidLength { from: String, to: String, length: f64 },
    #[error("invalid multiplier {multiplier} for zone {zone} in mode {mode}")]
    InvalidMultiplier { mode: DeliveryMode, zone: ZoneType, multiplier: f64 },
    #[error("unknown delivery mode: {0}")]
    UnknownMode(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}


impl From<toml::de::Error> for RouteError {
    fn from(error: toml::de::Error) -> Self {
        RouteError::Config(error.to_string())
    }
}
