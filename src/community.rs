use std::collections::{HashSet, VecDeque};

use crate::graph::Graph;
use crate::types::VInt;

/// Split the current graph into its connected components, walking a BFS
/// from every unvisited vertex. Each vertex lands in exactly one community;
/// isolated vertices form singleton communities.
pub fn connected_components(graph: &Graph) -> Vec<Vec<VInt>> {
    let mut visited = HashSet::<VInt>::new();
    let mut communities = vec![];

    for vertex_id in graph.adj_map.keys() {
        if !visited.contains(vertex_id) {
            let mut component = Vec::new();
            bfs_component(graph, vertex_id, &mut visited, &mut component);
            communities.push(component);
        }
    }
    communities
}

// Using bfs to walk through one component.
fn bfs_component(
    graph: &Graph,
    start_vertex: &VInt,
    visited_vertex_list: &mut HashSet<VInt>,
    result: &mut Vec<VInt>,
) {
    let mut queue = VecDeque::new();
    queue.push_back(*start_vertex);
    visited_vertex_list.insert(*start_vertex);

    while let Some(v) = queue.pop_front() {
        result.push(v);
        for neighbor in graph.get_neighbor(&v) {
            if !visited_vertex_list.contains(&neighbor) {
                queue.push_back(neighbor);
                visited_vertex_list.insert(neighbor);
            }
        }
    }
}
