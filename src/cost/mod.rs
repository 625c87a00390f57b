pub mod weights;

pub use weights::WeightTable;

use std::{convert::Infallible, fmt, str::FromStr};
use serde::Deserialize;

use crate::errors::RouteError;


/// Agent making the delivery
/// Each mode has its own sensitivity to zone types, see WeightTable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeliveryMode {
    Human,
    Motorbike,
    Car,
}

impl DeliveryMode {

    /// Every supported mode in the fixed order used for tie-breaking
    pub const ALL: [DeliveryMode; 3] = [DeliveryMode::Human, DeliveryMode::Motorbike, DeliveryMode::Car];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::Human => "human",
            DeliveryMode::Motorbike => "motorbike",
            DeliveryMode::Car => "car",
        }
    }

    /// Position in ALL, used to index per-mode tables
    pub(crate) fn index(&self) -> usize {
        match self {
            DeliveryMode::Human => 0,
            DeliveryMode::Motorbike => 1,
            DeliveryMode::Car => 2,
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMode {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeliveryMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| RouteError::UnknownMode(s.to_string()))
    }
}


/// Categorical tag on a road segment
/// The set is open ended, unrecognised tags are kept verbatim in Other
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ZoneType {
    #[default]
    Normal,
    SchoolZone,
    TrafficLight,
    NarrowAlley,
    Intersection,
    Other(String),
}

impl ZoneType {
    pub fn as_str(&self) -> &str {
        match self {
            ZoneType::Normal => "normal",
            ZoneType::SchoolZone => "school_zone",
            ZoneType::TrafficLight => "traffic_light",
            ZoneType::NarrowAlley => "narrow_alley",
            ZoneType::Intersection => "intersection",
            ZoneType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ZoneType::from(s))
    }
}

impl From<&str> for ZoneType {
    fn from(tag: &str) -> Self {
        match tag {
            "normal" => ZoneType::Normal,
            "school_zone" => ZoneType::SchoolZone,
            "traffic_light" => ZoneType::TrafficLight,
            "narrow_alley" => ZoneType::NarrowAlley,
            "intersection" => ZoneType::Intersection,
            other => ZoneType::Other(other.to_string()),
        }
    }
}

impl From<String> for ZoneType {
    fn from(tag: String) -> Self {
        match ZoneType::from(tag.as_str()) {
            ZoneType::Other(_) => ZoneType::Other(tag),
            known => known,
        }
    }
}

impl From<ZoneType> for String {
    fn from(zone: ZoneType) -> Self {
        match zone {
            ZoneType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}


/// Maps (mode, zone, length) to the cost of traversing an edge
/// Pure lookup - an unknown zone is multiplier 1, never an error
#[derive(Clone, Debug, Default)]
pub struct CostModel {
    weights: WeightTable,
}

impl CostModel {

    pub fn new(weights: WeightTable) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// length * multiplier(mode, zone)
    /// length is expected to be non-negative, graph construction enforces this
    pub fn effective_cost(&self, mode: DeliveryMode, zone: &ZoneType, length: f64) -> f64 {
        length * self.weights.multiplier(mode, zone)
    }
}
