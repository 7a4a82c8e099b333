//! Undirected dependency graph over feature indices
//!
//! Invariants:
//! - Node ids are feature indices from the adjacency matrix; isolated nodes are
//!   kept and come out of component decomposition as singleton subgraphs.
//! - A [`Subgraph`] is an immutable induced snapshot: component decomposition and
//!   node removal build new subgraphs instead of mutating shared state, so sibling
//!   subgraphs never alias each other.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::pipeline::adjacency::AdjacencyMatrix;

/// The full dependency graph derived from an adjacency matrix.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    full: Subgraph,
}

impl DependencyGraph {
    pub fn from_adjacency(adjacency: &AdjacencyMatrix) -> Self {
        let nodes: Vec<usize> = (0..adjacency.n_nodes()).collect();
        let mut neighbors: BTreeMap<usize, BTreeSet<usize>> =
            nodes.iter().map(|&v| (v, BTreeSet::new())).collect();
        for (i, j) in adjacency.edges() {
            neighbors.entry(i).or_default().insert(j);
            neighbors.entry(j).or_default().insert(i);
        }
        Self {
            full: Subgraph { nodes, neighbors },
        }
    }

    pub fn node_count(&self) -> usize {
        self.full.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.full.edge_count()
    }

    /// Maximal mutually reachable node subsets, as induced subgraphs.
    pub fn connected_components(&self) -> Vec<Subgraph> {
        self.full.connected_components()
    }

    pub fn as_subgraph(&self) -> &Subgraph {
        &self.full
    }
}

/// Immutable induced view over a node subset and its internal edges.
#[derive(Debug, Clone)]
pub struct Subgraph {
    nodes: Vec<usize>,
    neighbors: BTreeMap<usize, BTreeSet<usize>>,
}

impl Subgraph {
    /// A single isolated node.
    pub fn singleton(node: usize) -> Self {
        let mut neighbors = BTreeMap::new();
        neighbors.insert(node, BTreeSet::new());
        Self {
            nodes: vec![node],
            neighbors,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.neighbors.values().map(|n| n.len()).sum::<usize>() / 2
    }

    /// Node ids in ascending order.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Edges as (i, j) pairs with i < j, in ascending order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(self.edge_count());
        for (&v, neighbors) in &self.neighbors {
            for &w in neighbors.range((v + 1)..) {
                out.push((v, w));
            }
        }
        out
    }

    pub fn contains(&self, node: usize) -> bool {
        self.neighbors.contains_key(&node)
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.neighbors.get(&a).is_some_and(|n| n.contains(&b))
    }

    /// Neighbors of `node` within this subgraph.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors.get(&node).into_iter().flatten().copied()
    }

    /// True iff every node pair is adjacent; single-node (and empty) subgraphs
    /// are vacuously complete.
    pub fn is_complete(&self) -> bool {
        let expected = self.node_count().saturating_sub(1);
        self.neighbors.values().all(|n| n.len() == expected)
    }

    /// New subgraph induced on the nodes not in `removed`.
    pub fn without_nodes(&self, removed: &BTreeSet<usize>) -> Subgraph {
        let nodes: Vec<usize> = self
            .nodes
            .iter()
            .copied()
            .filter(|v| !removed.contains(v))
            .collect();
        let neighbors = nodes
            .iter()
            .map(|&v| {
                let kept: BTreeSet<usize> = self.neighbors[&v]
                    .iter()
                    .copied()
                    .filter(|w| !removed.contains(w))
                    .collect();
                (v, kept)
            })
            .collect();
        Subgraph { nodes, neighbors }
    }

    /// BFS partition into maximal connected induced subgraphs.
    pub fn connected_components(&self) -> Vec<Subgraph> {
        let mut seen: BTreeSet<usize> = BTreeSet::new();
        let mut components = Vec::new();

        for &start in &self.nodes {
            if seen.contains(&start) {
                continue;
            }
            let mut members = BTreeSet::new();
            members.insert(start);
            seen.insert(start);
            let mut queue = VecDeque::from([start]);
            while let Some(v) = queue.pop_front() {
                for w in self.neighbors(v) {
                    if seen.insert(w) {
                        members.insert(w);
                        queue.push_back(w);
                    }
                }
            }
            components.push(self.induced(&members));
        }
        components
    }

    /// True iff all nodes are mutually reachable (empty and singleton count).
    pub fn is_connected(&self) -> bool {
        self.connected_components().len() <= 1
    }

    // Induced snapshot over a member set known to be closed under adjacency
    // restriction (callers pass component member sets).
    fn induced(&self, members: &BTreeSet<usize>) -> Subgraph {
        let nodes: Vec<usize> = members.iter().copied().collect();
        let neighbors = nodes
            .iter()
            .map(|&v| {
                let kept: BTreeSet<usize> = self.neighbors[&v]
                    .iter()
                    .copied()
                    .filter(|w| members.contains(w))
                    .collect();
                (v, kept)
            })
            .collect();
        Subgraph { nodes, neighbors }
    }
}
