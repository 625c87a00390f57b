use crate::collections::FxIndexMap;
use super::{shortest_path, GraphNodeMap};

use std::{collections::BinaryHeap, hash::Hash, cmp::Ordering, fmt::Debug};
use log::trace;
use num_traits::Zero;
use indexmap::map::Entry::{Occupied, Vacant};




/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start Node, traverse through graph until node meets goal criteria
/// Returns the path from start to goal and its total cost, None if no node meets the goal
///
/// Edge costs must be non-negative - negative costs give undefined results
pub fn dijkstra<N, C, IT, NN, G>(start: N, neighbors: NN, goal: G) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    // Build the graph - terminates when the goal is met
    let (node_map, goal_index) = build_dijkstra_graph(start, neighbors, goal);

    let goal_index = goal_index?;
    let &(_, cost) = node_map.get_index(goal_index)?.1;
    let path = shortest_path(&node_map, goal_index)?;
    Some((path, cost))
}


/// Returns a full map of the graph, includes all (reachable) nodes and costs
/// Runs until the frontier is empty
pub fn dijkstra_nodes_full<N, C, IT, NN>(start: N, neighbors: NN) -> GraphNodeMap<N, C>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + Ord + Copy + Debug,
    {

    let (node_map, _) = build_dijkstra_graph(start, neighbors, |_| false);
    node_map
}


/// Traverses the graph using Dijkstra's algorithm
/// Returns a map of nodes with their smallest costs along with the index of the goal node
/// Nodes absent from the map were never reached - their cost is infinite
fn build_dijkstra_graph<N, C, IT, NN, G>(start: N, neighbors: NN, goal_fn: G) -> (GraphNodeMap<N, C>, Option<usize>)
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool // Returns true if goal is met
    {

    // Nodes to visit - binary heap sorts Biggest to Smallest
    // NodeId reverses the ordering so the cheapest entry pops first
    let mut nodes_to_visit: BinaryHeap<NodeId<C>> = BinaryHeap::new();

    // best known cost per node
    // The tuple contains (parent_index, cost) where parent_index is the index of the parent node in the map
    // for the start node, parent_index is set to usize::MAX to indicate it has no parent
    let mut nodes_map: FxIndexMap<N, (usize, C)> = FxIndexMap::default();

    let start_index = nodes_map.insert_full(start, (usize::MAX, Zero::zero())).0;
    nodes_to_visit.push(NodeId{
        index: start_index,
        cost: Zero::zero(),
    });

    // Loop over each node to visit, removing the smallest node
    while let Some(NodeId {cost, index}) = nodes_to_visit.pop() {

        // fetch current best cost for node
        let Some((node, &(_, c))) = nodes_map.get_index(index) else {
            continue;
        };

        // Stale entry: a cheaper path was recorded after this one was queued
        if cost > c {
            trace!("skipping stale entry {node:?} at {cost:?}, best is {c:?}");
            continue;
        }

        if goal_fn(node) {
            return (nodes_map, Some(index));
        }

        // neighbors are collected first, nodes_map is borrowed by node
        let edges: Vec<(N, C)> = neighbors(node).into_iter().collect();

        for (neighbor, edge_cost) in edges {

            let new_cost = edge_cost + c;

            let neighbor_index;

            match nodes_map.entry(neighbor) {
                Vacant(e) => {
                    neighbor_index = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        neighbor_index = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            trace!("relaxed node #{neighbor_index} to {new_cost:?}");
            nodes_to_visit.push(NodeId {
                index: neighbor_index,
                cost: new_cost,
            });
        }
    }

    (nodes_map, None)
}


/// Frontier entry
/// - for ordering we only need cost and the index of the node in the map
#[derive(Debug)]
struct NodeId<T> {
    index: usize,
    cost: T
}

impl<T: Ord> Ord for NodeId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
    }
}
impl<T: Ord> PartialOrd for NodeId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: PartialEq> PartialEq for NodeId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}
impl<T: PartialEq> Eq for NodeId<T> {}
