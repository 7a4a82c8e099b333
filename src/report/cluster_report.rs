//! Cluster summary report generation

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::Decomposition;

/// One discovered redundancy cluster, resolved to feature names.
#[derive(Debug, Clone)]
pub struct ClusterEntry {
    pub indices: Vec<usize>,
    pub members: Vec<String>,
    pub edges: Vec<(usize, usize)>,
}

/// Summary of the decomposition run
#[derive(Debug, Default)]
pub struct ClusterSummary {
    pub n_features: usize,
    pub clusters: Vec<ClusterEntry>,
    pub passes: usize,
    pub nodes_cut: usize,
}

impl ClusterSummary {
    /// Build a summary from the decomposition, largest clusters first.
    pub fn new(feature_names: &[String], decomposition: &Decomposition) -> Self {
        let mut clusters: Vec<ClusterEntry> = decomposition
            .cliques
            .iter()
            .map(|clique| ClusterEntry {
                indices: clique.nodes().to_vec(),
                members: clique
                    .nodes()
                    .iter()
                    .map(|&i| feature_names[i].clone())
                    .collect(),
                edges: clique.edges(),
            })
            .collect();
        clusters.sort_by(|a, b| {
            b.indices
                .len()
                .cmp(&a.indices.len())
                .then(a.indices.cmp(&b.indices))
        });

        Self {
            n_features: feature_names.len(),
            clusters,
            passes: decomposition.passes,
            nodes_cut: decomposition.nodes_cut,
        }
    }

    pub fn n_multi_node(&self) -> usize {
        self.clusters.iter().filter(|c| c.indices.len() > 1).count()
    }

    pub fn n_singletons(&self) -> usize {
        self.clusters.iter().filter(|c| c.indices.len() == 1).count()
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("▣").cyan(),
            style("CLUSTER SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Cluster").add_attribute(Attribute::Bold),
            Cell::new("Size").add_attribute(Attribute::Bold),
            Cell::new("Features").add_attribute(Attribute::Bold),
            Cell::new("Edges").add_attribute(Attribute::Bold),
        ]);

        for (id, cluster) in self.clusters.iter().enumerate() {
            let size = cluster.indices.len();
            table.add_row(vec![
                Cell::new(id),
                Cell::new(size).fg(if size > 1 { Color::Green } else { Color::White }),
                Cell::new(cluster.members.join(", ")),
                Cell::new(cluster.edges.len()),
            ]);
        }

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        println!();
        println!(
            "      Features: {}   Clusters: {}   Multi-node: {}   Singletons: {}",
            style(self.n_features).bold(),
            style(self.clusters.len()).bold(),
            style(self.n_multi_node()).green().bold(),
            style(self.n_singletons()).bold(),
        );
        println!(
            "      Decomposition passes: {}   Nodes removed as cuts: {}",
            style(self.passes).bold(),
            style(self.nodes_cut).bold(),
        );
    }
}
