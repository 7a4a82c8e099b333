//! Minimum vertex cut
//!
//! The global minimum vertex cut of a connected, non-complete graph is the
//! smallest over all non-adjacent node pairs (s, t) of the smallest node set
//! separating s from t. Each pairwise cut is computed by max-flow/min-cut duality
//! on the standard vertex-split network: every node becomes an in/out arc of unit
//! capacity, every edge an unbounded arc in both directions, and the max flow from
//! s to t saturates exactly the separating nodes.
//!
//! Ties among equal-size cuts are resolved by scan order (ascending node pairs);
//! callers must not rely on which minimal cut is returned.

use std::collections::{BTreeSet, VecDeque};

use crate::error::{ClusterError, Result};
use crate::graph::subgraph::Subgraph;

/// Smallest node set whose removal disconnects `subgraph`.
///
/// Preconditions: the subgraph is connected, has at least 2 nodes, and is not
/// complete. The first two are the caller's structural responsibility (the
/// partitioner only submits connected, non-complete components); violations of
/// the node-count and completeness preconditions are reported as errors.
pub fn minimum_vertex_cut(subgraph: &Subgraph) -> Result<BTreeSet<usize>> {
    let k = subgraph.node_count();
    if k < 2 {
        return Err(ClusterError::CutOnTrivialSubgraph { nodes: k });
    }

    let nodes = subgraph.nodes();

    // Local adjacency over 0..k
    let adjacency: Vec<Vec<usize>> = nodes
        .iter()
        .map(|&v| {
            subgraph
                .neighbors(v)
                .map(|w| nodes.binary_search(&w).expect("neighbor is a member node"))
                .collect()
        })
        .collect();

    let mut best: Option<Vec<usize>> = None;
    for s in 0..k {
        for t in (s + 1)..k {
            if adjacency[s].contains(&t) {
                continue;
            }
            let cut = pairwise_vertex_cut(&adjacency, s, t);
            if best.as_ref().map_or(true, |b| cut.len() < b.len()) {
                let minimal = cut.len() == 1;
                best = Some(cut);
                if minimal {
                    // a connected graph has no smaller cut
                    break;
                }
            }
        }
        if best.as_ref().is_some_and(|b| b.len() == 1) {
            break;
        }
    }

    match best {
        Some(cut) => Ok(cut.into_iter().map(|local| nodes[local]).collect()),
        // every pair adjacent
        None => Err(ClusterError::CutOnCompleteSubgraph),
    }
}

/// Smallest node set separating non-adjacent s from t, via Edmonds-Karp on the
/// vertex-split flow network.
fn pairwise_vertex_cut(adjacency: &[Vec<usize>], s: usize, t: usize) -> Vec<usize> {
    let k = adjacency.len();
    let size = 2 * k;
    // v_in = 2v, v_out = 2v + 1; flow through a node is capped at 1, edge arcs
    // are effectively unbounded (total flow never exceeds k)
    let infinity = (k + 1) as i64;
    let mut residual = vec![vec![0i64; size]; size];
    for v in 0..k {
        residual[2 * v][2 * v + 1] = 1;
    }
    for (v, neighbors) in adjacency.iter().enumerate() {
        for &w in neighbors {
            residual[2 * v + 1][2 * w] = infinity;
        }
    }

    let source = 2 * s + 1;
    let sink = 2 * t;

    loop {
        let parent = bfs_tree(&residual, source, sink);
        if parent[sink] == usize::MAX {
            break;
        }
        let mut bottleneck = i64::MAX;
        let mut v = sink;
        while v != source {
            let u = parent[v];
            bottleneck = bottleneck.min(residual[u][v]);
            v = u;
        }
        let mut v = sink;
        while v != source {
            let u = parent[v];
            residual[u][v] -= bottleneck;
            residual[v][u] += bottleneck;
            v = u;
        }
    }

    // Saturated in/out arcs crossing the residual-reachable boundary are the cut
    let reachable = residual_reachable(&residual, source);
    (0..k)
        .filter(|&v| reachable[2 * v] && !reachable[2 * v + 1])
        .collect()
}

// BFS parent tree over arcs with residual capacity; usize::MAX marks unreached.
fn bfs_tree(residual: &[Vec<i64>], source: usize, sink: usize) -> Vec<usize> {
    let size = residual.len();
    let mut parent = vec![usize::MAX; size];
    parent[source] = source;
    let mut queue = VecDeque::from([source]);
    while let Some(u) = queue.pop_front() {
        if u == sink {
            break;
        }
        for v in 0..size {
            if parent[v] == usize::MAX && residual[u][v] > 0 {
                parent[v] = u;
                queue.push_back(v);
            }
        }
    }
    parent
}

fn residual_reachable(residual: &[Vec<i64>], source: usize) -> Vec<bool> {
    let size = residual.len();
    let mut reachable = vec![false; size];
    reachable[source] = true;
    let mut queue = VecDeque::from([source]);
    while let Some(u) = queue.pop_front() {
        for v in 0..size {
            if !reachable[v] && residual[u][v] > 0 {
                reachable[v] = true;
                queue.push_back(v);
            }
        }
    }
    reachable
}
