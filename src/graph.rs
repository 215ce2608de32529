use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::{bail, Context, Result};

use crate::config::READ_BUFFER_SIZE;
use crate::types::{Edge, VInt};

/// The mutable working graph, torn down edge by edge during divisive
/// community detection. Undirected: every inserted edge lands in both
/// endpoint neighbor lists. Vertices stay in the adjacency map after
/// losing their last edge.
#[derive(Default, Debug, Clone)]
pub struct Graph {
    pub(crate) adj_map: BTreeMap<VInt, Vec<VInt>>,
    v_size: u32,
    e_size: u32,
}

#[allow(dead_code)]
impl Graph {
    pub fn new() -> Graph {
        Graph {
            adj_map: BTreeMap::new(),
            v_size: 0,
            e_size: 0,
        }
    }

    pub fn from_edges(edges_iter: impl Iterator<Item = (VInt, VInt)>) -> Graph {
        let mut graph = Graph::new();
        for (u, v) in edges_iter {
            graph.insert_edge(u, v);
        }
        graph
    }

    /// Load an edge list from file, one whitespace-separated pair per line.
    pub fn from_edge_list_file(file_path: &str) -> Result<Graph> {
        let graph_file = File::open(file_path)
            .with_context(|| format!("failed to open edge list {}", file_path))?;
        let graph_reader = BufReader::with_capacity(READ_BUFFER_SIZE, graph_file);
        let mut graph = Graph::new();
        for line in graph_reader.lines() {
            let line = line?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            if tokens.len() != 2 {
                bail!("edge list format error: {:?}", line);
            }
            let u: VInt = tokens[0]
                .parse()
                .with_context(|| format!("bad vertex id {:?}", tokens[0]))?;
            let v: VInt = tokens[1]
                .parse()
                .with_context(|| format!("bad vertex id {:?}", tokens[1]))?;
            graph.insert_edge(u, v);
        }
        Ok(graph)
    }

    pub fn get_vertex_count(&self) -> u32 {
        self.v_size
    }

    pub fn get_edge_count(&self) -> u32 {
        self.e_size
    }

    pub fn insert_vertex(&mut self, u: VInt) {
        if !self.adj_map.contains_key(&u) {
            self.adj_map.insert(u, Vec::new());
            self.v_size += 1;
        }
    }

    pub fn insert_edge(&mut self, u: VInt, v: VInt) {
        self.insert_vertex(u);
        self.insert_vertex(v);

        // The pair is already present, nothing to do.
        if self.has_edge(&u, &v) {
            return;
        }

        self.adj_map.get_mut(&u).unwrap().push(v);
        self.adj_map.get_mut(&v).unwrap().push(u);
        self.e_size += 1;
    }

    /// Remove an existing edge from the graph. Does nothing when the edge
    /// is absent.
    pub fn remove_edge(&mut self, edge: &Edge) {
        let (u, v) = edge.endpoints();
        if !self.has_edge(&u, &v) {
            return;
        }
        self.adj_map.get_mut(&u).unwrap().retain(|w| *w != v);
        self.adj_map.get_mut(&v).unwrap().retain(|w| *w != u);
        self.e_size -= 1;
    }

    /// If an edge exists in this graph.
    pub fn has_edge(&self, src_id: &VInt, dst_id: &VInt) -> bool {
        match self.adj_map.get(src_id) {
            None => false,
            Some(neighbors) => neighbors.contains(dst_id),
        }
    }

    pub fn get_neighbor(&self, u: &VInt) -> Vec<VInt> {
        if !self.adj_map.contains_key(u) {
            vec![]
        } else {
            self.adj_map.get(u).unwrap().clone()
        }
    }

    pub fn adjacency(&self) -> &BTreeMap<VInt, Vec<VInt>> {
        &self.adj_map
    }

    /// All edges currently present, each unordered pair once.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edge_list = Vec::with_capacity(self.e_size as usize);
        for (u, neighbors) in &self.adj_map {
            for v in neighbors {
                if v > u {
                    edge_list.push(Edge::new(*u, *v));
                }
            }
        }
        edge_list
    }
}

/// Immutable adjacency and degree table captured from the original graph
/// before any edge removal, used only for modularity scoring.
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    pub(crate) adj_map: BTreeMap<VInt, Vec<VInt>>,
    pub(crate) degree_map: BTreeMap<VInt, u32>,
    pub(crate) v_size: u32,
    pub(crate) e_size: u32,
}

#[allow(dead_code)]
impl GraphSnapshot {
    pub fn from_graph(graph: &Graph) -> GraphSnapshot {
        let adj_map = graph.adj_map.clone();
        let degree_map = adj_map
            .iter()
            .map(|(vertex_id, neighbors)| (*vertex_id, neighbors.len() as u32))
            .collect();
        GraphSnapshot {
            adj_map,
            degree_map,
            v_size: graph.v_size,
            e_size: graph.e_size,
        }
    }

    pub fn has_edge(&self, src_id: &VInt, dst_id: &VInt) -> bool {
        match self.adj_map.get(src_id) {
            None => false,
            Some(neighbors) => neighbors.contains(dst_id),
        }
    }

    pub fn degree(&self, vertex_id: &VInt) -> u32 {
        *self.degree_map.get(vertex_id).unwrap_or(&0)
    }

    pub fn get_vertex_count(&self) -> u32 {
        self.v_size
    }

    pub fn get_edge_count(&self) -> u32 {
        self.e_size
    }
}

#[cfg(test)]
mod test_graph {
    use std::io::Write;

    use crate::graph::{Graph, GraphSnapshot};
    use crate::types::Edge;

    #[test]
    fn test_insert_and_remove_edge() {
        let edge_iter = vec![(1, 2), (2, 3), (3, 1)].into_iter();
        let mut g = Graph::from_edges(edge_iter);
        assert_eq!(g.get_vertex_count(), 3);
        assert_eq!(g.get_edge_count(), 3);
        assert!(g.has_edge(&1, &2) && g.has_edge(&2, &1));

        g.remove_edge(&Edge::new(2, 1));
        assert_eq!(g.get_edge_count(), 2);
        assert!(!g.has_edge(&1, &2) && !g.has_edge(&2, &1));
        // The vertices survive edge removal.
        assert_eq!(g.get_vertex_count(), 3);

        // Removing a missing edge is a no-op.
        g.remove_edge(&Edge::new(1, 2));
        g.remove_edge(&Edge::new(7, 8));
        assert_eq!(g.get_edge_count(), 2);
    }

    #[test]
    fn test_duplicate_insert_ignored() {
        let mut g = Graph::new();
        g.insert_edge(0, 1);
        g.insert_edge(1, 0);
        assert_eq!(g.get_edge_count(), 1);
        assert_eq!(g.get_neighbor(&0), vec![1]);
    }

    #[test]
    fn test_get_neighbor_unknown_vertex() {
        let g = Graph::from_edges(vec![(1, 2)].into_iter());
        assert!(g.get_neighbor(&99).is_empty());
    }

    #[test]
    fn test_edges_enumeration() {
        let g = Graph::from_edges(vec![(2, 1), (2, 3)].into_iter());
        assert_eq!(g.edges(), vec![Edge::new(1, 2), Edge::new(2, 3)]);
    }

    #[test]
    fn test_snapshot_frozen_under_mutation() {
        let mut g = Graph::from_edges(vec![(0, 1), (1, 2)].into_iter());
        let snapshot = GraphSnapshot::from_graph(&g);
        g.remove_edge(&Edge::new(0, 1));

        assert!(snapshot.has_edge(&0, &1));
        assert_eq!(snapshot.degree(&1), 2);
        assert_eq!(snapshot.get_edge_count(), 2);
        assert_eq!(snapshot.degree(&42), 0);
    }

    #[test]
    fn test_from_edge_list_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 1").unwrap();
        writeln!(file, "1 2").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "2 0").unwrap();

        let g = Graph::from_edge_list_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(g.get_vertex_count(), 3);
        assert_eq!(g.get_edge_count(), 3);
    }

    #[test]
    fn test_from_edge_list_file_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 1 2").unwrap();
        assert!(Graph::from_edge_list_file(file.path().to_str().unwrap()).is_err());
    }
}
