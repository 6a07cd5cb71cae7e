//! Numeric feature scaling

use crate::error::{CinerateError, Result};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Parameters for one fitted column
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ColumnParams {
    mean: f64,
    std: f64,
}

/// Standardizes numeric columns to zero mean and unit variance.
///
/// Mean and (population) standard deviation are learned from the rows
/// given to `fit` and nothing else. A constant column gets std 1.0 so the
/// transform stays finite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    columns: Vec<String>,
    params: Vec<ColumnParams>,
    is_fitted: bool,
}

impl StandardScaler {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            params: Vec::new(),
            is_fitted: false,
        }
    }

    /// Learn per-column mean and std from the given frame
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        self.params.clear();

        for col_name in &self.columns {
            let values = column_as_f64(df, col_name)?;
            let n = values.len() as f64;
            if values.is_empty() {
                return Err(CinerateError::DataError(format!(
                    "cannot fit scaler on empty column '{}'",
                    col_name
                )));
            }

            let mean = values.iter().sum::<f64>() / n;
            let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
            let std = var.sqrt();

            self.params.push(ColumnParams {
                mean,
                std: if std == 0.0 { 1.0 } else { std },
            });
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Produce the standardized numeric block, one column per feature
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(CinerateError::ModelNotFitted);
        }

        let mut result = Array2::zeros((df.height(), self.columns.len()));

        for (col_idx, (col_name, params)) in self.columns.iter().zip(&self.params).enumerate() {
            let values = column_as_f64(df, col_name)?;
            for (row_idx, v) in values.into_iter().enumerate() {
                result[[row_idx, col_idx]] = (v - params.mean) / params.std;
            }
        }

        Ok(result)
    }

    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<Array2<f64>> {
        self.fit(df)?;
        self.transform(df)
    }

    pub fn n_features(&self) -> usize {
        self.columns.len()
    }
}

/// Extract a numeric column as f64 values, rejecting nulls
pub(crate) fn column_as_f64(df: &DataFrame, col_name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(col_name)
        .map_err(|_| CinerateError::FeatureNotFound(col_name.to_string()))?;

    let casted = column
        .cast(&DataType::Float64)
        .map_err(|e| CinerateError::DataError(e.to_string()))?;

    casted
        .f64()
        .map_err(|e| CinerateError::DataError(e.to_string()))?
        .into_iter()
        .map(|v| {
            v.ok_or_else(|| {
                CinerateError::DataError(format!("null value in numeric column '{}'", col_name))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df!("n_words" => &[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap()
    }

    #[test]
    fn test_standardizes_to_zero_mean_unit_variance() {
        let mut scaler = StandardScaler::new(vec!["n_words".to_string()]);
        let block = scaler.fit_transform(&frame()).unwrap();

        let n = block.nrows() as f64;
        let mean: f64 = block.column(0).iter().sum::<f64>() / n;
        let var: f64 = block.column(0).iter().map(|v| v * v).sum::<f64>() / n;

        assert!(mean.abs() < 1e-10);
        assert!((var - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_transform_uses_fitted_moments() {
        let mut scaler = StandardScaler::new(vec!["n_words".to_string()]);
        scaler.fit(&frame()).unwrap();

        let other = df!("n_words" => &[30.0]).unwrap();
        let block = scaler.transform(&other).unwrap();
        // 30 is the fit mean, so it maps to zero
        assert!(block[[0, 0]].abs() < 1e-10);
    }

    #[test]
    fn test_constant_column_stays_finite() {
        let constant = df!("n_words" => &[7.0, 7.0, 7.0]).unwrap();
        let mut scaler = StandardScaler::new(vec!["n_words".to_string()]);
        let block = scaler.fit_transform(&constant).unwrap();
        assert!(block.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_missing_column_fails() {
        let mut scaler = StandardScaler::new(vec!["absent".to_string()]);
        let result = scaler.fit(&frame());
        assert!(matches!(result, Err(CinerateError::FeatureNotFound(_))));
    }

    #[test]
    fn test_integer_column_is_cast() {
        let ints = df!("n_words" => &[1i64, 2, 3]).unwrap();
        let mut scaler = StandardScaler::new(vec!["n_words".to_string()]);
        assert!(scaler.fit_transform(&ints).is_ok());
    }
}
