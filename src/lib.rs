//! Cliq: feature redundancy clustering
//!
//! Builds a statistical dependency graph over the features of a numeric matrix
//! (pairwise correlation tests, significance-thresholded adjacency) and
//! decomposes it into disjoint cliques - clusters of mutually redundant
//! features. No output/label signal is used, and no feature inside a cluster is
//! singled out as the representative.

pub mod cli;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use error::{ClusterError, Result};
pub use pipeline::{cluster_features, ClusterConfig};
