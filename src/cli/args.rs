//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Cliq - cluster redundant features via correlation-graph clique decomposition
#[derive(Parser, Debug)]
#[command(name = "cliq")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet). Numeric columns are used as features.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Correlation test: "pearson" (default), "spearman", or "kendall".
    /// Single-letter aliases p/s/k are accepted.
    #[arg(short, long, default_value = "pearson")]
    pub method: String,

    /// Significance threshold for the pairwise dependency test
    #[arg(long, default_value = "0.05", value_parser = validate_alpha)]
    pub alpha: f64,

    /// Disable Bonferroni correction of the pairwise p-values.
    /// By default every p-value is multiplied by the number of comparisons.
    #[arg(long, default_value = "false")]
    pub no_correction: bool,

    /// Seed for the decomposition order. Fixing it reproduces the iteration
    /// order; equally valid decompositions may still differ between versions.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the decomposition as JSON to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Columns to drop before analysis (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub drop_columns: Vec<String>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for a full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

/// Validator for the alpha parameter
fn validate_alpha(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value <= 0.0 || value >= 1.0 {
        Err(format!("alpha must be strictly between 0 and 1, got {}", value))
    } else {
        Ok(value)
    }
}
