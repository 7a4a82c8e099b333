//! Validated numeric feature input
//!
//! The feature matrix is immutable once built: observations are rows, features are
//! columns. Validation happens here so the correlation engine can assume clean,
//! equally sized, fully finite columns.

use polars::prelude::*;

use crate::error::{ClusterError, Result};

/// Immutable n_obs x n_feat numeric input, stored column-major with feature names.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    n_observations: usize,
}

impl FeatureMatrix {
    /// Build a feature matrix from named columns.
    ///
    /// All columns must have the same length and contain only finite values.
    pub fn from_columns(names: Vec<String>, columns: Vec<Vec<f64>>) -> Result<Self> {
        let n_observations = columns.first().map_or(0, |c| c.len());

        for (name, column) in names.iter().zip(columns.iter()) {
            if column.len() != n_observations {
                return Err(ClusterError::RaggedColumn {
                    name: name.clone(),
                    expected: n_observations,
                    found: column.len(),
                });
            }
            if let Some(row) = column.iter().position(|v| !v.is_finite()) {
                return Err(ClusterError::MissingValue {
                    name: name.clone(),
                    row,
                });
            }
        }

        Ok(Self {
            names,
            columns,
            n_observations,
        })
    }

    /// Build a feature matrix from the numeric columns of a DataFrame.
    ///
    /// Non-numeric columns are ignored; numeric columns are cast to Float64. Rows
    /// with missing values are rejected up front - the correlation tests assume
    /// complete observations.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let mut names = Vec::new();
        let mut columns = Vec::new();

        for col in df.get_columns() {
            if !col.dtype().is_primitive_numeric() {
                continue;
            }
            let name = col.name().to_string();
            let cast = match col.cast(&DataType::Float64) {
                Ok(c) => c,
                Err(_) => continue,
            };
            let ca = match cast.f64() {
                Ok(ca) => ca,
                Err(_) => continue,
            };

            let mut values = Vec::with_capacity(ca.len());
            for (row, value) in ca.iter().enumerate() {
                match value {
                    Some(v) if v.is_finite() => values.push(v),
                    _ => {
                        return Err(ClusterError::MissingValue { name, row });
                    }
                }
            }
            names.push(name);
            columns.push(values);
        }

        Self::from_columns(names, columns)
    }

    pub fn n_features(&self) -> usize {
        self.columns.len()
    }

    pub fn n_observations(&self) -> usize {
        self.n_observations
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, feature: usize) -> &str {
        &self.names[feature]
    }

    /// Feature column by index.
    pub fn column(&self, feature: usize) -> &[f64] {
        &self.columns[feature]
    }
}
