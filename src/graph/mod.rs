//! Graph primitives for the dependency-graph decomposition

pub mod cut;
pub mod subgraph;

pub use cut::minimum_vertex_cut;
pub use subgraph::{DependencyGraph, Subgraph};
