//! Pipeline module - correlation testing, adjacency construction, decomposition

pub mod adjacency;
pub mod correlation;
pub mod loader;
pub mod matrix;
pub mod partition;

pub use adjacency::{build_adjacency, AdjacencyMatrix};
pub use correlation::{
    correlation_matrices, CorrelationFn, CorrelationMatrices, CorrelationMethod,
};
pub use loader::load_dataset;
pub use matrix::FeatureMatrix;
pub use partition::{decompose, verify_partition, Decomposition};

use crate::error::Result;
use crate::graph::DependencyGraph;

/// Pipeline configuration.
#[derive(Debug, Clone, Copy)]
pub struct ClusterConfig {
    /// Correlation test applied to every feature pair.
    pub method: CorrelationMethod,
    /// Significance threshold for the dependency edges.
    pub alpha: f64,
    /// Apply Bonferroni correction over all pairwise comparisons.
    pub correct: bool,
    /// Seed for the decomposition order; None draws an arbitrary seed.
    pub seed: Option<u64>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            method: CorrelationMethod::Pearson,
            alpha: 0.05,
            correct: true,
            seed: None,
        }
    }
}

/// Full pipeline: correlation tests -> adjacency -> dependency graph -> cliques.
pub fn cluster_features(matrix: &FeatureMatrix, config: &ClusterConfig) -> Result<Decomposition> {
    let matrices = correlation_matrices(matrix, config.method)?;
    let adjacency = build_adjacency(&matrices, config.alpha, config.correct);
    let graph = DependencyGraph::from_adjacency(&adjacency);
    decompose(&graph, config.seed)
}
