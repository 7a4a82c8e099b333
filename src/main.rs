//! Cliq: feature redundancy clustering CLI
//!
//! Loads a numeric dataset, runs pairwise correlation tests, thresholds the
//! p-values into a dependency graph, and decomposes it into redundancy clusters
//! (cliques). Prints a step-by-step run log and a cluster summary.

mod cli;
mod error;
mod graph;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use cli::Cli;
use graph::DependencyGraph;
use pipeline::{
    build_adjacency, correlation_matrices, decompose, load_dataset, CorrelationMethod,
    FeatureMatrix,
};
use report::{export_decomposition, ClusterSummary, ExportParams};
use utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configuration errors surface before any computation
    let method: CorrelationMethod = cli.method.parse()?;
    let correct = !cli.no_correction;

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.input, &cli.method, cli.alpha, correct, cli.seed);

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...");
    let mut df = load_dataset(&cli.input, cli.infer_schema_length)?;
    if !cli.drop_columns.is_empty() {
        df = df.drop_many(&cli.drop_columns);
    }
    finish_with_success(&spinner, "Dataset loaded");

    let (rows, cols) = df.shape();
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);

    let matrix = FeatureMatrix::from_dataframe(&df)?;
    print_count("numeric feature column(s)", matrix.n_features());
    print_step_time(step_start.elapsed());

    // Step 2: Correlation tests
    print_step_header(2, "Pairwise Correlation Tests");
    let step_start = Instant::now();
    let n = matrix.n_features();
    let n_comparisons = n * n.saturating_sub(1) / 2;
    let spinner = create_spinner(&format!(
        "Testing {} feature pair(s) ({})...",
        n_comparisons, method
    ));
    let matrices = correlation_matrices(&matrix, method)?;
    finish_with_success(&spinner, "Correlation tests complete");
    print_info(&format!("{} pairwise comparison(s)", n_comparisons));
    print_step_time(step_start.elapsed());

    // Step 3: Dependency graph
    print_step_header(3, "Dependency Graph");
    let step_start = Instant::now();
    let adjacency = build_adjacency(&matrices, cli.alpha, correct);
    let graph = DependencyGraph::from_adjacency(&adjacency);
    print_count("dependency edge(s)", graph.edge_count());
    print_info(&format!(
        "alpha = {}, correction = {}",
        cli.alpha,
        if correct { "bonferroni" } else { "none" }
    ));
    print_count(
        "connected component(s)",
        graph.connected_components().len(),
    );
    print_step_time(step_start.elapsed());

    // Step 4: Clique decomposition
    print_step_header(4, "Clique Decomposition");
    let step_start = Instant::now();
    let decomposition = decompose(&graph, cli.seed)?;
    print_count("redundancy cluster(s)", decomposition.n_cliques());
    print_info(&format!(
        "{} pass(es), {} node(s) removed as cuts",
        decomposition.passes, decomposition.nodes_cut
    ));
    print_step_time(step_start.elapsed());

    // Summary
    let summary = ClusterSummary::new(matrix.names(), &decomposition);
    summary.display();

    // Optional JSON export
    if let Some(output) = &cli.output {
        let input_file = cli.input.display().to_string();
        let method_name = method.to_string();
        let params = ExportParams {
            input_file: &input_file,
            method: &method_name,
            alpha: cli.alpha,
            bonferroni: correct,
            seed: cli.seed,
        };
        export_decomposition(&summary, output, &params)?;
        print_success(&format!(
            "Exported decomposition to {}",
            style(output.display()).cyan()
        ));
    }

    print_completion();
    Ok(())
}
