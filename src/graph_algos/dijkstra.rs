use crate::errors::PathPlannerError;
use crate::collections::FxIndexMap;
use super::shortest_path;

use std::{collections::BinaryHeap, hash::Hash, cmp::Ordering, fmt::Debug};
use num_traits::Zero;
use indexmap::map::Entry::{Occupied, Vacant};
use rustc_hash::FxHashSet;




/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start Node, traverse through graph until node meets goal criteria
/// Returns the path from start to goal (inclusive) and its total cost
pub fn dijkstra<N, C, IT, NN, G>(start: N, neighbors: NN, goal: G) -> Result<(Vec<N>, C), PathPlannerError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    // Build the graph - terminates when the goal is met
    let (node_map, goal_index) = build_dijkstra_graph(start, neighbors, goal);

    let goal_index = goal_index.ok_or(PathPlannerError::NoPathFound)?;
    let path = shortest_path(&node_map, goal_index)?;
    let (_, &(_, cost)) = node_map.get_index(goal_index).ok_or(PathPlannerError::NoPathFound)?;

    Ok((path, cost))
}


/// Traverses the graph using Dijkstra's algorithm
/// Returns a map of nodes with their smallest costs along with the index of the goal node
///
/// Each node is finalized the first time it is popped and never relaxed again,
/// so the search terminates even when handed non-positive edge costs.
fn build_dijkstra_graph<N, C, IT, NN, G>(start: N, neighbors: NN, goal_fn: G) -> (FxIndexMap<N, (usize, C)>, Option<usize>)
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool // Returns true if goal is met
    {

    // Nodes to visit - binary heap sorts Biggest to Smallest
    // NodeId reverses the ordering so the cheapest node pops first
    let mut nodes_to_visit: BinaryHeap<NodeId<C>> = BinaryHeap::new();

    // The tuple contains (parent_index, cost) where parent_index is the index of the parent node in the map
    // for the start node, parent_index is set to usize::MAX to indicate it has no parent
    let mut nodes_map: FxIndexMap<N, (usize, C)> = FxIndexMap::default();

    // finalized nodes - cost is known, no longer need to visit
    let mut settled: FxHashSet<usize> = FxHashSet::default();

    let start_index = nodes_map.insert_full(start, (usize::MAX, Zero::zero())).0;
    nodes_to_visit.push(NodeId{
        index: start_index,
        cost: Zero::zero(), // This is the cost from the start node
    });

    // Loop over each node to visit, removing the smallest node
    while let Some(NodeId {cost, index}) = nodes_to_visit.pop() {

        // Stale queue entry, a cheaper entry for this node was already handled
        if !settled.insert(index) {
            continue;
        }

        let Some((node, &(_, c))) = nodes_map.get_index(index) else {
            continue;
        };

        if cost > c {
            continue;
        }

        // Check if we've reached the goal
        if goal_fn(node) {
            return (nodes_map, Some(index));
        }

        let adjacent = neighbors(node);

        for (neighbor, edge_cost) in adjacent {

            // new cost to reach this node = edge cost + node cost
            let new_cost = edge_cost + c;

            let neighbor_index;

            match nodes_map.entry(neighbor) {
                Vacant(e) => {
                    // This is the first time we're seeing this neighbor
                    neighbor_index = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    // Ties keep the existing parent
                    if !settled.contains(&e.index()) && e.get().1 > new_cost {
                        neighbor_index = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            // Only add to the queue if we've found a better path
            nodes_to_visit.push(NodeId {
                index: neighbor_index,
                cost: new_cost,
            });
        }
    }

    (nodes_map, None)
}


/// Node identifier
/// - for ordering we only need cost and a way to identify the node
/// - equal costs pop the earliest discovered node first
#[derive(Debug)]
struct NodeId<T> {
    index: usize,
    cost: T
}

impl<T: Ord> Ord for NodeId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}
impl<T: Ord> PartialOrd for NodeId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: PartialEq> PartialEq for NodeId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.index == other.index
    }
}
impl<T: PartialEq> Eq for NodeId<T> {}
