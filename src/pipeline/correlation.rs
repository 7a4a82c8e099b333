//! Pairwise correlation testing
//!
//! Computes a correlation statistic and a two-sided p-value for every unordered
//! feature pair, in parallel via Rayon. Built-in tests: Pearson, Spearman (Pearson
//! on average ranks), and Kendall tau-b. A caller-supplied function can replace the
//! built-ins through [`CorrelationMethod::Custom`].
//!
//! Only the upper triangle (row < column) of the result matrices is meaningful;
//! coefficients are 0 and p-values 1 elsewhere.

use std::fmt;
use std::str::FromStr;

use faer::Mat;
use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use crate::error::{ClusterError, Result};
use crate::pipeline::matrix::FeatureMatrix;

/// Contract for a caller-supplied correlation test: two equally sized samples in,
/// (statistic, two-sided p-value) out.
pub type CorrelationFn = fn(&[f64], &[f64]) -> Result<(f64, f64)>;

/// Correlation test selector.
///
/// The closed set of built-ins plus one variant wrapping a caller-supplied
/// function; anything else is rejected at parse time, before computation starts.
#[derive(Debug, Clone, Copy)]
pub enum CorrelationMethod {
    Pearson,
    Spearman,
    Kendall,
    Custom(CorrelationFn),
}

impl CorrelationMethod {
    /// Run the selected test on one pair of samples.
    pub fn test(&self, x: &[f64], y: &[f64]) -> Result<(f64, f64)> {
        match self {
            CorrelationMethod::Pearson => pearson(x, y).map_err(ClusterError::Statistics),
            CorrelationMethod::Spearman => spearman(x, y).map_err(ClusterError::Statistics),
            CorrelationMethod::Kendall => kendall(x, y).map_err(ClusterError::Statistics),
            CorrelationMethod::Custom(f) => f(x, y),
        }
    }
}

impl FromStr for CorrelationMethod {
    type Err = ClusterError;

    /// Accepts the long names and the single-letter aliases `p`/`s`/`k`.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pearson" | "p" => Ok(CorrelationMethod::Pearson),
            "spearman" | "s" => Ok(CorrelationMethod::Spearman),
            "kendall" | "k" => Ok(CorrelationMethod::Kendall),
            other => Err(ClusterError::UnknownMethod(other.to_string())),
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationMethod::Pearson => write!(f, "pearson"),
            CorrelationMethod::Spearman => write!(f, "spearman"),
            CorrelationMethod::Kendall => write!(f, "kendall"),
            CorrelationMethod::Custom(_) => write!(f, "custom"),
        }
    }
}

/// Correlation coefficients and p-values for all feature pairs.
///
/// Both matrices are n_feat x n_feat with only the upper triangle meaningful.
#[derive(Debug, Clone)]
pub struct CorrelationMatrices {
    pub coefficients: Mat<f64>,
    pub p_values: Mat<f64>,
}

impl CorrelationMatrices {
    pub fn n_features(&self) -> usize {
        self.p_values.nrows()
    }
}

/// Run the correlation test on every unordered feature pair.
///
/// Pairs are independent and processed in parallel. A failure for any single pair
/// aborts the whole computation - the adjacency step downstream needs a fully
/// populated p-value matrix, so no partial result is ever returned.
pub fn correlation_matrices(
    matrix: &FeatureMatrix,
    method: CorrelationMethod,
) -> Result<CorrelationMatrices> {
    let n = matrix.n_features();
    if n < 2 {
        return Err(ClusterError::TooFewFeatures { found: n });
    }

    // Upper-triangle pair indices, same enumeration order as the output matrices
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let tested: Vec<(usize, usize, f64, f64)> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let (statistic, p_value) = method
                .test(matrix.column(i), matrix.column(j))
                .map_err(|err| {
                    let reason = match err {
                        ClusterError::Statistics(msg) => msg,
                        other => other.to_string(),
                    };
                    ClusterError::Correlation {
                        feature_a: i,
                        feature_b: j,
                        reason,
                    }
                })?;
            Ok((i, j, statistic, p_value))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut coefficients = Mat::<f64>::zeros(n, n);
    let mut p_values = Mat::<f64>::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            p_values[(i, j)] = 1.0;
        }
    }
    for (i, j, statistic, p_value) in tested {
        coefficients[(i, j)] = statistic;
        p_values[(i, j)] = p_value;
    }

    Ok(CorrelationMatrices {
        coefficients,
        p_values,
    })
}

/// Pearson correlation with a two-sided t-test p-value.
///
/// Single-pass Welford moments for numerical stability.
fn pearson(x: &[f64], y: &[f64]) -> std::result::Result<(f64, f64), String> {
    let n = x.len();
    if n != y.len() {
        return Err(format!("sample lengths differ: {} vs {}", n, y.len()));
    }
    if n < 3 {
        return Err(format!("needs at least 3 observations, got {}", n));
    }

    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut m2_x = 0.0;
    let mut m2_y = 0.0;
    let mut cov_xy = 0.0;

    for (k, (&xv, &yv)) in x.iter().zip(y.iter()).enumerate() {
        let count = (k + 1) as f64;
        let dx = xv - mean_x;
        let dy = yv - mean_y;
        mean_x += dx / count;
        mean_y += dy / count;
        m2_x += dx * (xv - mean_x);
        m2_y += dy * (yv - mean_y);
        cov_xy += dx * (yv - mean_y);
    }

    if m2_x == 0.0 || m2_y == 0.0 {
        return Err("constant sample has no defined correlation".to_string());
    }

    let r = (cov_xy / (m2_x.sqrt() * m2_y.sqrt())).clamp(-1.0, 1.0);
    let p = t_test_p_value(r, n)?;
    Ok((r, p))
}

/// Spearman rank correlation: Pearson on average ranks, with the same t-test.
fn spearman(x: &[f64], y: &[f64]) -> std::result::Result<(f64, f64), String> {
    if x.len() != y.len() {
        return Err(format!("sample lengths differ: {} vs {}", x.len(), y.len()));
    }
    let rx = average_ranks(x);
    let ry = average_ranks(y);
    pearson(&rx, &ry)
}

/// Kendall tau-b with tie corrections and a normal-approximation p-value.
///
/// Direct O(n^2) concordance scan; adequate at feature-analysis sample sizes.
fn kendall(x: &[f64], y: &[f64]) -> std::result::Result<(f64, f64), String> {
    let n = x.len();
    if n != y.len() {
        return Err(format!("sample lengths differ: {} vs {}", n, y.len()));
    }
    if n < 3 {
        return Err(format!("needs at least 3 observations, got {}", n));
    }

    let mut concordant_minus_discordant = 0i64;
    for i in 0..n {
        for j in (i + 1)..n {
            let sx = sign(x[j] - x[i]);
            let sy = sign(y[j] - y[i]);
            concordant_minus_discordant += (sx * sy) as i64;
        }
    }

    let ties_x = tie_group_sizes(x);
    let ties_y = tie_group_sizes(y);

    let nf = n as f64;
    let n0 = nf * (nf - 1.0) / 2.0;
    let n1: f64 = ties_x
        .iter()
        .map(|&t| t as f64 * (t as f64 - 1.0) / 2.0)
        .sum();
    let n2: f64 = ties_y
        .iter()
        .map(|&t| t as f64 * (t as f64 - 1.0) / 2.0)
        .sum();

    let denom = ((n0 - n1) * (n0 - n2)).sqrt();
    if denom == 0.0 {
        return Err("constant sample has no defined correlation".to_string());
    }
    let tau = (concordant_minus_discordant as f64 / denom).clamp(-1.0, 1.0);

    // Tie-corrected variance of (nc - nd) for the normal approximation
    let v0 = nf * (nf - 1.0) * (2.0 * nf + 5.0);
    let vt: f64 = ties_x
        .iter()
        .map(|&t| {
            let t = t as f64;
            t * (t - 1.0) * (2.0 * t + 5.0)
        })
        .sum();
    let vu: f64 = ties_y
        .iter()
        .map(|&t| {
            let t = t as f64;
            t * (t - 1.0) * (2.0 * t + 5.0)
        })
        .sum();
    let sum_t1: f64 = ties_x.iter().map(|&t| t as f64 * (t as f64 - 1.0)).sum();
    let sum_u1: f64 = ties_y.iter().map(|&t| t as f64 * (t as f64 - 1.0)).sum();
    let sum_t2: f64 = ties_x
        .iter()
        .map(|&t| {
            let t = t as f64;
            t * (t - 1.0) * (t - 2.0)
        })
        .sum();
    let sum_u2: f64 = ties_y
        .iter()
        .map(|&t| {
            let t = t as f64;
            t * (t - 1.0) * (t - 2.0)
        })
        .sum();

    let v1 = sum_t1 * sum_u1 / (2.0 * nf * (nf - 1.0));
    let v2 = sum_t2 * sum_u2 / (9.0 * nf * (nf - 1.0) * (nf - 2.0));
    let variance = (v0 - vt - vu) / 18.0 + v1 + v2;
    if variance <= 0.0 {
        return Err("tie structure leaves no variance for the test".to_string());
    }

    let z = concordant_minus_discordant as f64 / variance.sqrt();
    let normal = Normal::new(0.0, 1.0).map_err(|e| e.to_string())?;
    let p = (2.0 * normal.cdf(-z.abs())).min(1.0);
    Ok((tau, p))
}

/// Two-sided p-value for a correlation coefficient under the t distribution with
/// n - 2 degrees of freedom. |r| = 1 degenerates to the limit p = 0.
fn t_test_p_value(r: f64, n: usize) -> std::result::Result<f64, String> {
    let df = (n - 2) as f64;
    let denom = 1.0 - r * r;
    if denom <= 0.0 {
        return Ok(0.0);
    }
    let t = r * (df / denom).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| e.to_string())?;
    Ok((2.0 * dist.cdf(-t.abs())).min(1.0))
}

/// 1-based ranks; tied values share the mean of their rank range.
fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start;
        while end + 1 < n && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        let shared = (start + end) as f64 / 2.0 + 1.0;
        for &idx in &order[start..=end] {
            ranks[idx] = shared;
        }
        start = end + 1;
    }
    ranks
}

/// Sizes of tie groups (runs of equal values), including size-1 groups.
fn tie_group_sizes(values: &[f64]) -> Vec<usize> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut groups = Vec::new();
    let mut start = 0;
    while start < sorted.len() {
        let mut end = start;
        while end + 1 < sorted.len() && sorted[end + 1] == sorted[start] {
            end += 1;
        }
        groups.push(end - start + 1);
        start = end + 1;
    }
    groups
}

fn sign(v: f64) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pearson_perfect_positive() {
        let (r, p) = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
        assert!(p < 1e-9, "p = {}", p);
    }

    #[test]
    fn pearson_perfect_negative() {
        let (r, p) = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[5.0, 4.0, 3.0, 2.0, 1.0]).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
        assert!(p < 1e-9, "p = {}", p);
    }

    #[test]
    fn pearson_known_value_and_p() {
        // r = 0.8, t = 0.8 * sqrt(3 / 0.36) ~ 2.309, p ~ 0.104 under t(3)
        let (r, p) = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[1.0, 3.0, 2.0, 5.0, 4.0]).unwrap();
        assert!((r - 0.8).abs() < 1e-12, "r = {}", r);
        assert!((p - 0.104).abs() < 5e-3, "p = {}", p);
    }

    #[test]
    fn pearson_rejects_constant_sample() {
        let err = pearson(&[1.0, 1.0, 1.0, 1.0], &[1.0, 2.0, 3.0, 4.0]).unwrap_err();
        assert!(err.contains("constant"));
    }

    #[test]
    fn pearson_rejects_short_sample() {
        let err = pearson(&[1.0, 2.0], &[3.0, 4.0]).unwrap_err();
        assert!(err.contains("at least 3"));
    }

    #[test]
    fn spearman_sees_monotone_nonlinear_as_perfect() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y: Vec<f64> = x.iter().map(|v| v.exp()).collect();
        let (rho, p) = spearman(&x, &y).unwrap();
        assert!((rho - 1.0).abs() < 1e-12);
        assert!(p < 1e-9, "p = {}", p);
    }

    #[test]
    fn kendall_known_value() {
        // 8 concordant, 2 discordant pairs of 10: tau = 0.6, z ~ 1.47, p ~ 0.142
        let (tau, p) = kendall(&[1.0, 2.0, 3.0, 4.0, 5.0], &[1.0, 3.0, 2.0, 5.0, 4.0]).unwrap();
        assert!((tau - 0.6).abs() < 1e-12, "tau = {}", tau);
        assert!((p - 0.1416).abs() < 1e-3, "p = {}", p);
    }

    #[test]
    fn kendall_rejects_constant_sample() {
        let err = kendall(&[2.0, 2.0, 2.0, 2.0], &[1.0, 2.0, 3.0, 4.0]).unwrap_err();
        assert!(err.contains("constant"));
    }

    #[test]
    fn average_ranks_shares_tied_ranks() {
        assert_eq!(
            average_ranks(&[10.0, 20.0, 20.0, 30.0]),
            vec![1.0, 2.5, 2.5, 4.0]
        );
    }

    #[test]
    fn method_parses_long_names_and_aliases() {
        assert!(matches!(
            "pearson".parse::<CorrelationMethod>().unwrap(),
            CorrelationMethod::Pearson
        ));
        assert!(matches!(
            "S".parse::<CorrelationMethod>().unwrap(),
            CorrelationMethod::Spearman
        ));
        assert!(matches!(
            "k".parse::<CorrelationMethod>().unwrap(),
            CorrelationMethod::Kendall
        ));
    }

    #[test]
    fn method_rejects_unknown_identifier() {
        let err = "frobnicate".parse::<CorrelationMethod>().unwrap_err();
        assert!(matches!(err, ClusterError::UnknownMethod(_)));
    }

    #[test]
    fn custom_method_dispatches() {
        fn always_dependent(_x: &[f64], _y: &[f64]) -> Result<(f64, f64)> {
            Ok((1.0, 0.0))
        }
        let method = CorrelationMethod::Custom(always_dependent);
        let (r, p) = method.test(&[1.0, 2.0], &[3.0, 4.0]).unwrap();
        assert_eq!((r, p), (1.0, 0.0));
    }
}
