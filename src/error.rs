//! Error types for the clustering pipeline.
//!
//! Configuration and shape errors surface before any computation starts; a failure
//! in any single pairwise correlation aborts the whole matrix computation, since the
//! adjacency step requires a fully populated p-value matrix. The cut precondition
//! variants exist for the graph layer's contract and are prevented structurally by
//! the partitioner (complete subgraphs are never sent to the cut routine).

/// Errors produced by the core clustering pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    /// Correlation method identifier was not recognized.
    #[error("unknown correlation method '{0}' (expected 'pearson', 'spearman', or 'kendall')")]
    UnknownMethod(String),

    /// Fewer than two feature columns were supplied.
    #[error("feature matrix needs at least 2 feature columns, got {found}")]
    TooFewFeatures { found: usize },

    /// Feature columns have differing lengths.
    #[error("feature column '{name}' has {found} observations, expected {expected}")]
    RaggedColumn {
        name: String,
        expected: usize,
        found: usize,
    },

    /// A feature column contains a missing or non-finite value.
    #[error("feature column '{name}' has a missing or non-finite value at row {row}")]
    MissingValue { name: String, row: usize },

    /// A correlation statistic is undefined for the given input.
    #[error("correlation test failed: {0}")]
    Statistics(String),

    /// The correlation test failed for one feature pair.
    ///
    /// Indices refer to feature columns. Any single pair failure aborts the
    /// whole matrix computation.
    #[error("correlation test failed for features {feature_a} and {feature_b}: {reason}")]
    Correlation {
        feature_a: usize,
        feature_b: usize,
        reason: String,
    },

    /// Minimum vertex cut invoked on a subgraph with fewer than 2 nodes.
    #[error("minimum vertex cut needs at least 2 nodes, got {nodes}")]
    CutOnTrivialSubgraph { nodes: usize },

    /// Minimum vertex cut invoked on a complete subgraph.
    #[error("minimum vertex cut is undefined for a complete subgraph")]
    CutOnCompleteSubgraph,
}

pub type Result<T> = std::result::Result<T, ClusterError>;
