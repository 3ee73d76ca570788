use crate::errors::PathPlannerError;
use super::GraphNodeMap;

/// Construct the shortest path from the goal node to the start node
/// Returns the ordered path as a vector of nodes from start to goal
/// node_map: GraphNodeMap<N, C> - map of nodes with their parent index and cost
/// goal_index: usize - index of the goal node in the node_map
pub(crate) fn shortest_path<N, C>(node_map: &GraphNodeMap<N, C>, goal_index: usize) -> Result<Vec<N>, PathPlannerError>
where
    N: Clone,
{

    let mut path = Vec::new();
    let mut current_index = goal_index;

    // Trace back from goal to start
    while current_index != usize::MAX {
        let Some((node, &(parent_index, _))) = node_map.get_index(current_index) else {
            return Err(PathPlannerError::NoPathFound);
        };
        path.push(node.clone());
        current_index = parent_index;

        // a parent chain longer than the map means the map is corrupt
        if path.len() > node_map.len() {
            return Err(PathPlannerError::NoPathFound);
        }
    }

    // The path is in reverse order, so reverse it
    path.reverse();

    if path.is_empty() {
        return Err(PathPlannerError::NoPathFound);
    }

    Ok(path)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_reconstruction() {
        let mut node_map: GraphNodeMap<String, u32> = GraphNodeMap::default();

        let a_index = node_map.insert_full("A".to_string(), (usize::MAX, 0)).0;
        let b_index = node_map.insert_full("B".to_string(), (a_index, 1)).0;
        let c_index = node_map.insert_full("C".to_string(), (a_index, 3)).0;
        let d_index = node_map.insert_full("D".to_string(), (c_index, 4)).0;

        let path_to_d = shortest_path(&node_map, d_index).unwrap();
        assert_eq!(path_to_d, vec!["A", "C", "D"].into_iter().map(String::from).collect::<Vec<_>>());

        let path_to_b = shortest_path(&node_map, b_index).unwrap();
        assert_eq!(path_to_b, vec!["A", "B"].into_iter().map(String::from).collect::<Vec<_>>());
    }

    #[test]
    fn test_missing_goal_index() {
        let node_map: GraphNodeMap<String, u32> = GraphNodeMap::default();
        assert_eq!(shortest_path(&node_map, 3), Err(PathPlannerError::NoPathFound));
    }

    #[test]
    fn test_parent_cycle_is_rejected() {
        let mut node_map: GraphNodeMap<&str, u32> = GraphNodeMap::default();
        node_map.insert("A", (1, 0));
        node_map.insert("B", (0, 1));
        assert_eq!(shortest_path(&node_map, 1), Err(PathPlannerError::NoPathFound));
    }
}
