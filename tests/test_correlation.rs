//! Unit tests for the correlation engine

use cliq::error::ClusterError;
use cliq::pipeline::{correlation_matrices, CorrelationMethod, FeatureMatrix};

#[path = "common/mod.rs"]
mod common;

fn matrix(columns: Vec<(&str, Vec<f64>)>) -> FeatureMatrix {
    let (names, data): (Vec<String>, Vec<Vec<f64>>) = columns
        .into_iter()
        .map(|(name, values)| (name.to_string(), values))
        .unzip();
    FeatureMatrix::from_columns(names, data).unwrap()
}

#[test]
fn perfectly_dependent_pair_has_zero_p() {
    let m = matrix(vec![
        ("a", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
        ("b", vec![2.0, 4.0, 6.0, 8.0, 10.0]),
    ]);
    let out = correlation_matrices(&m, CorrelationMethod::Pearson).unwrap();
    assert!((out.coefficients[(0, 1)] - 1.0).abs() < 1e-12);
    assert!(out.p_values[(0, 1)] < 1e-12);
}

#[test]
fn only_upper_triangle_is_populated() {
    let m = matrix(vec![
        ("a", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
        ("b", vec![2.0, 4.0, 6.0, 8.0, 10.0]),
        ("c", vec![1.0, 3.0, 2.0, 5.0, 4.0]),
    ]);
    let out = correlation_matrices(&m, CorrelationMethod::Pearson).unwrap();
    assert_eq!(out.n_features(), 3);
    // diagonal and lower triangle keep their initial values
    for i in 0..3 {
        assert_eq!(out.coefficients[(i, i)], 0.0);
        assert_eq!(out.p_values[(i, i)], 1.0);
    }
    assert_eq!(out.coefficients[(2, 0)], 0.0);
    assert_eq!(out.p_values[(2, 0)], 1.0);
}

#[test]
fn spearman_and_kendall_agree_on_monotone_data() {
    let x: Vec<f64> = (1..=20).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| v.powi(3)).collect();
    let m = matrix(vec![("x", x), ("y", y)]);

    let spearman = correlation_matrices(&m, CorrelationMethod::Spearman).unwrap();
    let kendall = correlation_matrices(&m, CorrelationMethod::Kendall).unwrap();

    assert!((spearman.coefficients[(0, 1)] - 1.0).abs() < 1e-12);
    assert!((kendall.coefficients[(0, 1)] - 1.0).abs() < 1e-12);
    assert!(spearman.p_values[(0, 1)] < 1e-6);
    assert!(kendall.p_values[(0, 1)] < 1e-6);
}

#[test]
fn constant_column_aborts_whole_computation() {
    let m = matrix(vec![
        ("a", vec![1.0, 2.0, 3.0, 4.0]),
        ("flat", vec![7.0, 7.0, 7.0, 7.0]),
        ("b", vec![4.0, 3.0, 2.0, 1.0]),
    ]);
    let err = correlation_matrices(&m, CorrelationMethod::Pearson).unwrap_err();
    match err {
        ClusterError::Correlation {
            feature_a,
            feature_b,
            reason,
        } => {
            assert!(feature_a == 1 || feature_b == 1, "error names the flat column");
            assert!(reason.contains("constant"));
        }
        other => panic!("expected Correlation error, got {:?}", other),
    }
}

#[test]
fn single_feature_is_rejected_before_computation() {
    let m = matrix(vec![("only", vec![1.0, 2.0, 3.0])]);
    let err = correlation_matrices(&m, CorrelationMethod::Pearson).unwrap_err();
    assert!(matches!(err, ClusterError::TooFewFeatures { found: 1 }));
}

#[test]
fn custom_method_failure_carries_pair_indices() {
    fn failing(_x: &[f64], _y: &[f64]) -> cliq::Result<(f64, f64)> {
        Err(ClusterError::Statistics("no statistic here".to_string()))
    }
    let m = matrix(vec![
        ("a", vec![1.0, 2.0, 3.0]),
        ("b", vec![3.0, 2.0, 1.0]),
    ]);
    let err = correlation_matrices(&m, CorrelationMethod::Custom(failing)).unwrap_err();
    assert!(matches!(
        err,
        ClusterError::Correlation {
            feature_a: 0,
            feature_b: 1,
            ..
        }
    ));
}

#[test]
fn custom_method_results_are_stored() {
    fn anticorrelated(_x: &[f64], _y: &[f64]) -> cliq::Result<(f64, f64)> {
        Ok((-0.5, 0.25))
    }
    let m = matrix(vec![
        ("a", vec![1.0, 2.0, 3.0]),
        ("b", vec![3.0, 2.0, 1.0]),
    ]);
    let out = correlation_matrices(&m, CorrelationMethod::Custom(anticorrelated)).unwrap();
    assert_eq!(out.coefficients[(0, 1)], -0.5);
    assert_eq!(out.p_values[(0, 1)], 0.25);
}

#[test]
fn tightly_coupled_fixture_is_dependent_everywhere() {
    let m = common::tightly_coupled_matrix(500, 11);
    let out = correlation_matrices(&m, CorrelationMethod::Pearson).unwrap();
    for (i, j) in [(0, 1), (0, 2), (1, 2)] {
        assert!(
            out.p_values[(i, j)] < 1e-12,
            "pair ({}, {}) should be dependent, p = {}",
            i,
            j,
            out.p_values[(i, j)]
        );
    }
}

#[test]
fn bridged_fixture_base_features_are_uncorrelated() {
    let m = common::bridged_matrix(2);
    let out = correlation_matrices(&m, CorrelationMethod::Pearson).unwrap();
    // exact zero correlation by construction (complete residue cycles)
    for (i, j) in [(0, 1), (0, 2), (1, 2)] {
        assert!(
            out.coefficients[(i, j)].abs() < 1e-9,
            "pair ({}, {}) should be uncorrelated, r = {}",
            i,
            j,
            out.coefficients[(i, j)]
        );
        assert!(out.p_values[(i, j)] > 0.99);
    }
    // the product features correlate with their factors
    for (i, j) in [(0, 3), (1, 3), (2, 3), (0, 4), (1, 4), (3, 4)] {
        assert!(
            out.p_values[(i, j)] < 1e-12,
            "pair ({}, {}) should be dependent, p = {}",
            i,
            j,
            out.p_values[(i, j)]
        );
    }
}
