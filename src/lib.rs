//! Zone-aware delivery routing
//!
//! Road segments carry a length and a zone type (school zone, narrow alley, ...).
//! Each delivery mode weighs zones differently; [`routing::Router`] finds the
//! cheapest path for a mode and picks the cheapest mode between two nodes.

pub mod collections;
pub mod cost;
pub mod errors;
pub mod graph;
pub mod graph_algos;
pub mod routing;

pub use cost::{CostModel, DeliveryMode, WeightTable, ZoneType};
pub use errors::RouteError;
pub use graph::{Direction, Edge, RoadGraph, RoadGraphBuilder};
pub use routing::{ModeChoice, Route, Router};
