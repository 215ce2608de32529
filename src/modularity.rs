use crate::graph::GraphSnapshot;
use crate::types::VInt;

/// Scores partitions against the frozen reference snapshot: adjacency and
/// degrees come from the original graph, never from the torn-down working
/// graph.
///
/// A community contributes `(1/2m) * sum over ordered pairs (i, j) of
/// (A_ij - k_i * k_j / 2m)`, self pairs included with `A_ii = 0`. The
/// overall Q of a partition is the plain sum of the per-community
/// contributions, each carrying its own 1/2m factor.
pub struct ModularityEvaluator<'a> {
    snapshot: &'a GraphSnapshot,
}

impl<'a> ModularityEvaluator<'a> {
    pub fn new(snapshot: &'a GraphSnapshot) -> ModularityEvaluator<'a> {
        ModularityEvaluator { snapshot }
    }

    pub fn community_contribution(&self, community: &[VInt]) -> f64 {
        let two_m = 2.0 * self.snapshot.get_edge_count() as f64;
        if two_m == 0.0 {
            return 0.0;
        }
        let mut community_q = 0.0;
        for i in community {
            let degree_i = self.snapshot.degree(i) as f64;
            for j in community {
                let a_ij = if self.snapshot.has_edge(i, j) { 1.0 } else { 0.0 };
                community_q += a_ij - degree_i * self.snapshot.degree(j) as f64 / two_m;
            }
        }
        community_q / two_m
    }

    /// One contribution per community, aligned with the partition order.
    /// Empty when the reference graph has no edges: no meaningful score
    /// exists for m == 0.
    pub fn partition_contributions(&self, partition: &[Vec<VInt>]) -> Vec<f64> {
        if self.snapshot.get_edge_count() == 0 {
            return vec![];
        }
        partition
            .iter()
            .map(|community| self.community_contribution(community))
            .collect()
    }

    pub fn partition_modularity(&self, partition: &[Vec<VInt>]) -> f64 {
        self.partition_contributions(partition).iter().sum()
    }
}

#[cfg(test)]
mod test_modularity {
    use crate::graph::{Graph, GraphSnapshot};
    use crate::modularity::ModularityEvaluator;

    #[test]
    fn test_complete_graph_single_community_is_zero() {
        // K4: every pair already matches its expectation exactly.
        let g = Graph::from_edges(
            vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)].into_iter(),
        );
        let snapshot = GraphSnapshot::from_graph(&g);
        let evaluator = ModularityEvaluator::new(&snapshot);
        let q = evaluator.partition_modularity(&[vec![0, 1, 2, 3]]);
        assert!(q.abs() < 1e-9, "Q = {}", q);
    }

    #[test]
    fn test_two_cluster_split() {
        // The karate-style toy fixture: two dense 4-vertex clusters joined
        // by the bridge 3-4.
        let g = Graph::from_edges(
            vec![
                (0, 1), (0, 2), (0, 3), (1, 2), (2, 3),
                (3, 4),
                (4, 5), (4, 6), (4, 7), (5, 6), (6, 7),
            ]
            .into_iter(),
        );
        let snapshot = GraphSnapshot::from_graph(&g);
        let evaluator = ModularityEvaluator::new(&snapshot);

        let partition = vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]];
        let contributions = evaluator.partition_contributions(&partition);
        assert_eq!(contributions.len(), 2);
        // Each side: (10 - 121/22) / 22 = 4.5 / 22.
        assert!((contributions[0] - 4.5 / 22.0).abs() < 1e-9);
        assert!((contributions[1] - 4.5 / 22.0).abs() < 1e-9);
        assert!((evaluator.partition_modularity(&partition) - 9.0 / 22.0).abs() < 1e-9);
    }

    #[test]
    fn test_scores_use_reference_not_working_graph() {
        let mut g = Graph::from_edges(vec![(0, 1), (1, 2), (2, 0)].into_iter());
        let snapshot = GraphSnapshot::from_graph(&g);
        g.remove_edge(&crate::types::Edge::new(0, 1));

        // Mutation after the snapshot must not change the score.
        let evaluator = ModularityEvaluator::new(&snapshot);
        let q = evaluator.partition_modularity(&[vec![0, 1, 2]]);
        assert!(q.abs() < 1e-9);
    }

    #[test]
    fn test_edgeless_reference_has_no_score() {
        let mut g = Graph::new();
        g.insert_vertex(0);
        let snapshot = GraphSnapshot::from_graph(&g);
        let evaluator = ModularityEvaluator::new(&snapshot);
        assert!(evaluator.partition_contributions(&[vec![0]]).is_empty());
        assert_eq!(evaluator.partition_modularity(&[vec![0]]), 0.0);
    }
}
