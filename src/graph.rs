use std::path::Path;
use log::debug;
use serde::Deserialize;

use crate::collections::FxIndexMap;
use crate::cost::ZoneType;
use crate::errors::RouteError;


/// Road segment leaving a node
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub length: f64, // non-negative, finite
    pub zone: ZoneType,
}

/// Whether add_edge inserts a single arc or a road usable both ways
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    OneWay,
    TwoWay,
}


/// Static road network
/// node -> (neighbor -> edge), every neighbor is also a key
#[derive(Clone, Debug, Default)]
pub struct RoadGraph {
    adjacency: FxIndexMap<String, FxIndexMap<String, Edge>>,
}

impl RoadGraph {

    pub fn builder(direction: Direction) -> RoadGraphBuilder {
        RoadGraphBuilder::new(direction)
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Node labels in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|edges| edges.len()).sum()
    }

    /// Outgoing edges of a node, empty for a node with no entry
    pub fn edges<'a>(&'a self, node: &str) -> impl Iterator<Item = (&'a str, &'a Edge)> + use<'a> {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(to, edge)| (to.as_str(), edge)))
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
        self.adjacency.get(from)?.get(to)
    }

    /// Load a graph from TOML
    ///
    /// ```toml
    /// directed = false
    ///
    /// [[edge]]
    /// from = "A"
    /// to = "B"
    /// length = 5.0
    /// zone = "normal"
    ///
    /// [[node]]
    /// name = "E"
    /// ```
    pub fn from_toml_str(input: &str) -> Result<Self, RouteError> {
        let file: GraphFile = toml::from_str(input)?;

        let direction = if file.directed { Direction::OneWay } else { Direction::TwoWay };
        let mut builder = RoadGraphBuilder::new(direction);
        for node in file.node {
            builder.add_node(node.name);
        }
        for edge in file.edge {
            builder.add_edge(edge.from, edge.to, edge.length, edge.zone)?;
        }
        Ok(builder.build())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RouteError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}


/// Incremental construction of a RoadGraph
/// Directedness is fixed up front so callers never have to guess symmetry
#[derive(Debug, Default)]
pub struct RoadGraphBuilder {
    direction: Direction,
    adjacency: FxIndexMap<String, FxIndexMap<String, Edge>>,
}

impl RoadGraphBuilder {

    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            adjacency: FxIndexMap::default(),
        }
    }

    /// Register a node, no-op if it exists
    pub fn add_node(&mut self, node: impl Into<String>) -> &mut Self {
        self.adjacency.entry(node.into()).or_default();
        self
    }

    /// Add a road segment, replacing any previous edge between the same pair
    /// TwoWay builders also insert the reverse arc with the same length and zone
    pub fn add_edge(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        length: f64,
        zone: impl Into<ZoneType>,
    ) -> Result<&mut Self, RouteError> {
        let (from, to) = (from.into(), to.into());
        if !length.is_finite() || length < 0.0 {
            return Err(RouteError::InvalidLength { from, to, length });
        }
        let edge = Edge { length, zone: zone.into() };

        self.add_node(to.clone());
        if self.direction == Direction::TwoWay {
            self.adjacency.entry(to.clone()).or_default().insert(from.clone(), edge.clone());
        }
        self.adjacency.entry(from).or_default().insert(to, edge);
        Ok(self)
    }

    pub fn build(self) -> RoadGraph {
        let graph = RoadGraph { adjacency: self.adjacency };
        debug!("built road graph: {} nodes, {} edges", graph.node_count(), graph.edge_count());
        graph
    }
}


#[derive(Deserialize)]
struct GraphFile {
    #[serde(default = "default_directed")]
    directed: bool,
    #[serde(default)]
    node: Vec<NodeRecord>,
    #[serde(default)]
    edge: Vec<EdgeRecord>,
}

fn default_directed() -> bool {
    true
}

#[derive(Deserialize)]
struct NodeRecord {
    name: String,
}

#[derive(Deserialize)]
struct EdgeRecord {
    from: String,
    to: String,
    length: f64,
    #[serde(default)]
    zone: ZoneType,
}
