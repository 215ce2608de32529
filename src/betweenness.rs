use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::graph::Graph;
use crate::types::{Edge, VInt};

/// Edge betweenness centrality of the current graph, Brandes' unweighted
/// formulation: one BFS per source vertex accumulating shortest-path counts,
/// then a reverse pass crediting each BFS-parent edge with its share of the
/// downstream dependency. Every undirected path is seen from both endpoints,
/// so all scores are halved at the end.
///
/// Returns one entry per edge currently present; an edgeless graph yields an
/// empty map.
pub fn edge_betweenness(graph: &Graph) -> BTreeMap<Edge, f64> {
    let mut betweenness = BTreeMap::<Edge, f64>::new();

    for s in graph.adj_map.keys() {
        let mut parents = HashMap::<VInt, Vec<VInt>>::new();
        let mut dist = HashMap::<VInt, i64>::new();
        let mut paths = HashMap::<VInt, f64>::new();
        let mut stack = Vec::<VInt>::new();
        let mut queue = VecDeque::<VInt>::new();

        dist.insert(*s, 0);
        paths.insert(*s, 1.0);
        queue.push_back(*s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let dist_v = dist[&v];
            // paths[v] is final once v leaves the queue: all of its
            // shortest-path predecessors were dequeued earlier.
            let paths_v = paths[&v];

            for w in graph.get_neighbor(&v) {
                if !dist.contains_key(&w) {
                    dist.insert(w, dist_v + 1);
                    queue.push_back(w);
                }
                if dist[&w] == dist_v + 1 {
                    *paths.entry(w).or_insert(0.0) += paths_v;
                    parents.entry(w).or_default().push(v);
                }
            }
        }

        // Reverse pass: pop in reverse BFS order, skip the source.
        let mut dependency = HashMap::<VInt, f64>::new();
        while let Some(w) = stack.pop() {
            if w == *s {
                continue;
            }
            if let Some(parent_list) = parents.get(&w) {
                for v in parent_list {
                    let credit = (paths[v] / paths[&w])
                        * (1.0 + dependency.get(&w).copied().unwrap_or(0.0));
                    *betweenness.entry(Edge::new(*v, w)).or_insert(0.0) += credit;
                    *dependency.entry(*v).or_insert(0.0) += credit;
                }
            }
        }
    }

    for score in betweenness.values_mut() {
        *score /= 2.0;
    }
    betweenness
}
