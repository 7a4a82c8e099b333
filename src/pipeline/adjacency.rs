//! Significance thresholding into a dependency adjacency matrix
//!
//! An edge between features i and j means the correlation test rejected
//! independence at level alpha, optionally after Bonferroni correction over all
//! n(n-1)/2 simultaneous comparisons.

use crate::pipeline::correlation::CorrelationMatrices;

/// Boolean adjacency over n features; only the upper triangle (i < j) is stored.
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix {
    n: usize,
    edges: Vec<bool>,
}

impl AdjacencyMatrix {
    /// All-false adjacency over `n` nodes.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            edges: vec![false; n * n.saturating_sub(1) / 2],
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.n
    }

    /// Number of simultaneous pairwise comparisons: n(n-1)/2.
    pub fn n_comparisons(&self) -> usize {
        self.n * self.n.saturating_sub(1) / 2
    }

    /// Whether features i and j are adjacent. Order of arguments is irrelevant;
    /// a node is never adjacent to itself.
    pub fn edge(&self, i: usize, j: usize) -> bool {
        if i == j {
            return false;
        }
        self.edges[self.offset(i.min(j), i.max(j))]
    }

    pub fn set_edge(&mut self, i: usize, j: usize, present: bool) {
        assert_ne!(i, j, "self-edges are not representable");
        let offset = self.offset(i.min(j), i.max(j));
        self.edges[offset] = present;
    }

    /// All edges as (i, j) pairs with i < j.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                if self.edge(i, j) {
                    out.push((i, j));
                }
            }
        }
        out
    }

    // Row-major upper-triangle offset for i < j
    fn offset(&self, i: usize, j: usize) -> usize {
        i * self.n - i * (i + 1) / 2 + (j - i - 1)
    }
}

/// Threshold the p-value matrix into an adjacency matrix.
///
/// With `correct` set, every p-value is multiplied by the number of pairwise
/// comparisons n(n-1)/2 (Bonferroni). The product is deliberately not clamped to 1:
/// an already large p-value simply moves further from the threshold.
pub fn build_adjacency(
    matrices: &CorrelationMatrices,
    alpha: f64,
    correct: bool,
) -> AdjacencyMatrix {
    let n = matrices.n_features();
    let mut adjacency = AdjacencyMatrix::new(n);
    let comparisons = adjacency.n_comparisons() as f64;

    for i in 0..n {
        for j in (i + 1)..n {
            let mut p = matrices.p_values[(i, j)];
            if correct {
                p *= comparisons;
            }
            adjacency.set_edge(i, j, p < alpha);
        }
    }
    adjacency
}
