use super::GraphNodeMap;

/// Construct the shortest path from the goal node back to the start node
/// Returns the ordered path as a vector of nodes from start to goal
/// node_map: GraphNodeMap<N, C> - map of nodes with their parent index and cost
/// goal_index: usize - index of the goal node in the node_map
/// None if goal_index or one of its ancestors is not in the map
pub(crate) fn shortest_path<N, C>(node_map: &GraphNodeMap<N, C>, goal_index: usize) -> Option<Vec<N>>
where
    N: Clone,
{

    let mut path = Vec::new();
    let mut current_index = goal_index;

    // start node has parent usize::MAX
    while current_index != usize::MAX {
        let (node, &(parent_index, _)) = node_map.get_index(current_index)?;
        path.push(node.clone());
        current_index = parent_index;
    }

    path.reverse();

    if path.is_empty() {
        return None;
    }

    Some(path)
}
