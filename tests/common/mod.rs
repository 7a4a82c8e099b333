//! Shared test utilities and fixture generators
//!
//! The deterministic fixtures mirror the shapes used by the original feature
//! analysis examples: one matrix where every feature is a function of every
//! other, and one where independent features are bridged by product features.

use cliq::pipeline::FeatureMatrix;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

/// 3 features where every pair is exactly linearly dependent:
/// f1 = 0.6 * f0 and f2 = 0.3 * f0 + 1.5 * f1.
///
/// Every pairwise correlation is +/-1 regardless of the sampled values, so the
/// dependency graph is a triangle at any reasonable alpha.
pub fn tightly_coupled_matrix(n_rows: usize, seed: u64) -> FeatureMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let f0: Vec<f64> = (0..n_rows).map(|_| rng.gen::<f64>() * 5.0).collect();
    let f1: Vec<f64> = f0.iter().map(|v| 0.6 * v).collect();
    let f2: Vec<f64> = f0
        .iter()
        .zip(f1.iter())
        .map(|(a, b)| 0.3 * a + 1.5 * b)
        .collect();

    FeatureMatrix::from_columns(
        vec!["f0".to_string(), "f1".to_string(), "f2".to_string()],
        vec![f0, f1, f2],
    )
    .unwrap()
}

/// 5 features: f0, f1, f2 mutually uncorrelated, bridged by the products
/// f3 = 2 * f0 * f1 * f2 and f4 = f0 * f1.
///
/// The base features are modular sequences with coprime periods (7, 11, 13), so
/// over any multiple of 1001 rows each residue combination occurs equally often
/// and the sample correlations among f0, f1, f2 - and between f2 and f4 - are
/// exactly zero. The product features correlate strongly with their factors.
/// Expected edges: (0,3) (1,3) (2,3) (0,4) (1,4) (3,4).
pub fn bridged_matrix(n_cycles: usize) -> FeatureMatrix {
    let n_rows = 1001 * n_cycles;
    let f0: Vec<f64> = (0..n_rows).map(|i| (i % 7) as f64).collect();
    let f1: Vec<f64> = (0..n_rows).map(|i| (i % 11) as f64).collect();
    let f2: Vec<f64> = (0..n_rows).map(|i| (i % 13) as f64).collect();
    let f3: Vec<f64> = (0..n_rows)
        .map(|i| 2.0 * f0[i] * f1[i] * f2[i])
        .collect();
    let f4: Vec<f64> = (0..n_rows).map(|i| f0[i] * f1[i]).collect();

    FeatureMatrix::from_columns(
        vec![
            "f0".to_string(),
            "f1".to_string(),
            "f2".to_string(),
            "f3".to_string(),
            "f4".to_string(),
        ],
        vec![f0, f1, f2, f3, f4],
    )
    .unwrap()
}

/// DataFrame with the tightly coupled fixture, for loader/CLI tests.
pub fn tightly_coupled_dataframe(n_rows: usize, seed: u64) -> DataFrame {
    let matrix = tightly_coupled_matrix(n_rows, seed);
    let columns: Vec<Column> = matrix
        .names()
        .iter()
        .enumerate()
        .map(|(i, name)| Column::new(name.as_str().into(), matrix.column(i).to_vec()))
        .collect();
    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file.
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}
