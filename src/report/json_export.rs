//! Decomposition export functionality

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::report::ClusterSummary;

/// Metadata about the clustering run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// Cliq version
    pub cliq_version: String,
    /// Input file path
    pub input_file: String,
    /// Correlation method used
    pub method: String,
    /// Significance threshold
    pub alpha: f64,
    /// Whether Bonferroni correction was applied
    pub bonferroni: bool,
    /// Number of pairwise comparisons
    pub n_comparisons: usize,
    /// Decomposition seed, if fixed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Summary statistics of the decomposition
#[derive(Serialize)]
pub struct DecompositionStats {
    pub n_features: usize,
    pub n_clusters: usize,
    pub n_multi_node_clusters: usize,
    pub n_singletons: usize,
    pub decomposition_passes: usize,
    pub nodes_removed_as_cuts: usize,
}

/// A single cluster entry
#[derive(Serialize)]
pub struct ClusterExportEntry {
    pub id: usize,
    pub features: Vec<String>,
    pub indices: Vec<usize>,
    pub edges: Vec<(usize, usize)>,
}

/// Complete export document
#[derive(Serialize)]
pub struct DecompositionExport {
    pub metadata: RunMetadata,
    pub summary: DecompositionStats,
    pub clusters: Vec<ClusterExportEntry>,
}

/// Parameters for the export metadata
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub method: &'a str,
    pub alpha: f64,
    pub bonferroni: bool,
    pub seed: Option<u64>,
}

/// Export the decomposition to a JSON file.
///
/// Clusters carry both feature names and indices; edges are index pairs into
/// the original feature order.
pub fn export_decomposition(
    summary: &ClusterSummary,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let n = summary.n_features;
    let metadata = RunMetadata {
        timestamp: Utc::now().to_rfc3339(),
        cliq_version: env!("CARGO_PKG_VERSION").to_string(),
        input_file: params.input_file.to_string(),
        method: params.method.to_string(),
        alpha: params.alpha,
        bonferroni: params.bonferroni,
        n_comparisons: n * n.saturating_sub(1) / 2,
        seed: params.seed,
    };

    let stats = DecompositionStats {
        n_features: summary.n_features,
        n_clusters: summary.clusters.len(),
        n_multi_node_clusters: summary.n_multi_node(),
        n_singletons: summary.n_singletons(),
        decomposition_passes: summary.passes,
        nodes_removed_as_cuts: summary.nodes_cut,
    };

    let clusters: Vec<ClusterExportEntry> = summary
        .clusters
        .iter()
        .enumerate()
        .map(|(id, cluster)| ClusterExportEntry {
            id,
            features: cluster.members.clone(),
            indices: cluster.indices.clone(),
            edges: cluster.edges.clone(),
        })
        .collect();

    let export = DecompositionExport {
        metadata,
        summary: stats,
        clusters,
    };

    let json = serde_json::to_string_pretty(&export).context("Failed to serialize export")?;
    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write export: {}", output_path.display()))?;

    Ok(())
}
