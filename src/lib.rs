//! Divisive (Girvan-Newman style) community detection over undirected,
//! unweighted graphs.
//!
//! The engine repeatedly computes edge betweenness centrality on the working
//! graph, removes every edge tied at the maximum score, splits the graph into
//! connected components, and scores the partition's modularity against a
//! frozen snapshot of the original graph, keeping the peak-modularity
//! partition across the whole teardown.

pub mod betweenness;
pub mod community;
mod config;
pub mod divisive;
pub mod graph;
pub mod logger;
pub mod modularity;
pub mod types;
mod util;

pub use betweenness::edge_betweenness;
pub use community::connected_components;
pub use divisive::{DivisiveEngine, DivisiveResult, IterationReport, PeakRecord};
pub use graph::{Graph, GraphSnapshot};
pub use modularity::ModularityEvaluator;
pub use types::{Edge, VInt};
