use std::collections::BTreeMap;

use anyhow::Result;
use itertools::Itertools;
use log::{debug, info};
use serde::Serialize;

use crate::betweenness::edge_betweenness;
use crate::community::connected_components;
use crate::graph::{Graph, GraphSnapshot};
use crate::modularity::ModularityEvaluator;
use crate::types::{Edge, VInt};
use crate::util::get_current_timestamp;

/// Snapshot of the best partition seen during the teardown: its total
/// modularity, the communities, and the working-graph adjacency at that
/// iteration. All three are deep copies, the working graph keeps mutating
/// after a peak is recorded.
#[derive(Debug, Clone, Serialize)]
pub struct PeakRecord {
    pub modularity: f64,
    pub partition: Vec<Vec<VInt>>,
    pub adjacency: BTreeMap<VInt, Vec<VInt>>,
}

/// Everything one iteration produced, for the reporting layer.
#[derive(Debug, Clone, Serialize)]
pub struct IterationReport {
    pub step: u32,
    pub max_betweenness: f64,
    pub removed: Vec<Edge>,
    pub partition: Vec<Vec<VInt>>,
    pub community_scores: Vec<f64>,
    pub modularity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DivisiveResult {
    pub iterations: Vec<IterationReport>,
    pub peak: Option<PeakRecord>,
}

impl DivisiveResult {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The divisive control loop. Owns the working graph for the duration of a
/// run; the reference snapshot is taken once before the first removal and
/// only ever read by the modularity evaluator.
pub struct DivisiveEngine {
    graph: Graph,
    snapshot: GraphSnapshot,
    peak: Option<PeakRecord>,
    step: u32,
}

impl DivisiveEngine {
    pub fn new(edges: impl IntoIterator<Item = (VInt, VInt)>) -> DivisiveEngine {
        Self::from_graph(Graph::from_edges(edges.into_iter()))
    }

    pub fn from_graph(graph: Graph) -> DivisiveEngine {
        let snapshot = GraphSnapshot::from_graph(&graph);
        DivisiveEngine {
            graph,
            snapshot,
            peak: None,
            step: 0,
        }
    }

    pub fn peak(&self) -> Option<&PeakRecord> {
        self.peak.as_ref()
    }

    pub fn working_graph(&self) -> &Graph {
        &self.graph
    }

    /// One teardown iteration. Returns `None` once no edge is left to
    /// analyze, otherwise removes every edge tied at the maximum betweenness
    /// and scores the resulting partition.
    pub fn step(&mut self) -> Option<IterationReport> {
        let betweenness = edge_betweenness(&self.graph);
        if betweenness.is_empty() {
            return None;
        }

        let max_betweenness = betweenness
            .values()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        // The scores are deterministic, exact equality catches every tie.
        let removed: Vec<Edge> = betweenness
            .iter()
            .filter(|(_, score)| **score == max_betweenness)
            .map(|(edge, _)| *edge)
            .collect();
        for edge in &removed {
            self.graph.remove_edge(edge);
        }

        let partition = connected_components(&self.graph);
        let evaluator = ModularityEvaluator::new(&self.snapshot);
        let community_scores = evaluator.partition_contributions(&partition);
        let modularity: f64 = community_scores.iter().sum();

        if self.peak.as_ref().map_or(true, |peak| modularity > peak.modularity) {
            self.peak = Some(PeakRecord {
                modularity,
                partition: partition.clone(),
                adjacency: self.graph.adj_map.clone(),
            });
        }

        self.step += 1;
        Some(IterationReport {
            step: self.step,
            max_betweenness,
            removed,
            partition,
            community_scores,
            modularity,
        })
    }

    /// Tear the graph down completely, collecting every iteration report and
    /// the peak record.
    pub fn run(mut self) -> DivisiveResult {
        let start = get_current_timestamp();
        let mut iterations = Vec::new();
        while let Some(report) = self.step() {
            info!(
                "step {}: removed [{}] (betweenness {:.2}), {} communities, Q = {:.4}",
                report.step,
                report.removed.iter().join(", "),
                report.max_betweenness,
                report.partition.len(),
                report.modularity
            );
            iterations.push(report);
        }
        match &self.peak {
            Some(peak) => info!(
                "peak modularity {:.4} with {} communities",
                peak.modularity,
                peak.partition.len()
            ),
            None => info!("no peak recorded: input graph had no edges"),
        }
        debug!("teardown finished in {} us", get_current_timestamp() - start);

        DivisiveResult {
            iterations,
            peak: self.peak,
        }
    }
}
