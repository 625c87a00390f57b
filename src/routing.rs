use log::debug;
use ordered_float::OrderedFloat;

use crate::collections::FxIndexMap;
use crate::cost::{CostModel, DeliveryMode};
use crate::errors::RouteError;
use crate::graph::RoadGraph;
use crate::graph_algos::dijkstra::{dijkstra, dijkstra_nodes_full};


/// Totally ordered cost used on the frontier
/// Lengths and multipliers are validated finite, so NaN never reaches the heap
pub(crate) type Cost = OrderedFloat<f64>;

/// A sum that overflowed to +inf is no better than never reaching the node
fn finite(cost: Cost) -> Option<f64> {
    Some(cost.into_inner()).filter(|c| c.is_finite())
}


/// Cheapest route for one mode
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub mode: DeliveryMode,
    pub cost: f64,
    pub nodes: Vec<String>, // start..=end
}

/// Outcome of comparing every delivery mode
/// A selected mode always carries its cost, including 0
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ModeChoice {
    Best { mode: DeliveryMode, cost: f64 },
    NoValidMode, // every mode is unreachable
}

impl ModeChoice {
    pub fn mode(&self) -> Option<DeliveryMode> {
        match self {
            ModeChoice::Best { mode, .. } => Some(*mode),
            ModeChoice::NoValidMode => None,
        }
    }

    pub fn cost(&self) -> Option<f64> {
        match self {
            ModeChoice::Best { cost, .. } => Some(*cost),
            ModeChoice::NoValidMode => None,
        }
    }
}


/// Shortest path engine and mode selector over an immutable road graph
///
/// Every query first checks that start and end are nodes of the graph and fails
/// with RouteError::UnknownNode otherwise. An unreachable end is not an error,
/// it is reported as None / ModeChoice::NoValidMode.
///
/// Edge costs are `length * multiplier`; both are validated non-negative when the
/// graph and weight table are built. Negative effective costs are unsupported.
#[derive(Clone, Debug)]
pub struct Router {
    graph: RoadGraph,
    cost_model: CostModel,
}

impl Router {

    pub fn new(graph: RoadGraph, cost_model: CostModel) -> Self {
        Self { graph, cost_model }
    }

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Minimum effective cost from start to end for a mode
    /// Ok(None) when end cannot be reached
    pub fn shortest_cost(&self, start: &str, end: &str, mode: DeliveryMode) -> Result<Option<f64>, RouteError> {
        self.check_node(start)?;
        self.check_node(end)?;

        let node_map = dijkstra_nodes_full(start, self.neighbors(mode));
        let cost = node_map.get(&end).and_then(|&(_, cost)| finite(cost));

        debug!("{mode}: {start} -> {end} = {cost:?} ({} nodes settled)", node_map.len());
        Ok(cost)
    }

    /// Like shortest_cost, also returning the nodes along the cheapest path
    pub fn shortest_route(&self, start: &str, end: &str, mode: DeliveryMode) -> Result<Option<Route>, RouteError> {
        self.check_node(start)?;
        self.check_node(end)?;

        let route = dijkstra(start, self.neighbors(mode), |node| *node == end)
            .and_then(|(path, cost)| Some(Route {
                mode,
                cost: finite(cost)?,
                nodes: path.into_iter().map(String::from).collect(),
            }));

        debug!("{mode}: route {start} -> {end} = {:?}", route.as_ref().map(|r| &r.nodes));
        Ok(route)
    }

    /// Cost of every node reachable from start, start included at 0
    /// Nodes whose cost overflows are left out
    pub fn costs_from(&self, start: &str, mode: DeliveryMode) -> Result<FxIndexMap<String, f64>, RouteError> {
        self.check_node(start)?;

        let node_map = dijkstra_nodes_full(start, self.neighbors(mode));
        Ok(node_map
            .into_iter()
            .filter_map(|(node, (_, cost))| Some((node.to_string(), finite(cost)?)))
            .collect())
    }

    /// Shortest cost for each mode, in DeliveryMode::ALL order
    pub fn mode_costs(&self, start: &str, end: &str) -> Result<Vec<(DeliveryMode, Option<f64>)>, RouteError> {
        DeliveryMode::ALL
            .into_iter()
            .map(|mode| Ok((mode, self.shortest_cost(start, end, mode)?)))
            .collect()
    }

    /// Mode with the lowest shortest cost
    /// Ties go to the mode listed first in DeliveryMode::ALL
    pub fn best_mode(&self, start: &str, end: &str) -> Result<ModeChoice, RouteError> {
        let mut best: Option<(DeliveryMode, f64)> = None;

        for (mode, cost) in self.mode_costs(start, end)? {
            let Some(cost) = cost else {
                debug!("{mode}: {end} unreachable from {start}");
                continue;
            };
            match best {
                Some((_, best_cost)) if best_cost <= cost => {}
                _ => best = Some((mode, cost)),
            }
        }

        let choice = match best {
            Some((mode, cost)) => ModeChoice::Best { mode, cost },
            None => ModeChoice::NoValidMode,
        };
        debug!("best mode {start} -> {end}: {choice:?}");
        Ok(choice)
    }

    fn check_node(&self, node: &str) -> Result<(), RouteError> {
        if self.graph.contains_node(node) {
            Ok(())
        } else {
            Err(RouteError::UnknownNode(node.to_string()))
        }
    }

    /// Neighbor function for the generic search, edge costs priced for one mode
    fn neighbors<'a>(&'a self, mode: DeliveryMode) -> impl Fn(&&'a str) -> Vec<(&'a str, Cost)> + 'a {
        move |node: &&'a str| {
            self.graph
                .edges(node)
                .map(|(to, edge)| (to, OrderedFloat(self.cost_model.effective_cost(mode, &edge.zone, edge.length))))
                .collect()
        }
    }
}
