//! Ordinal categorical encoding

use crate::error::{CinerateError, Result};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Encodes a categorical column by its position in a declared total order.
///
/// Unlike a label encoder, the category set and its order are fixed up
/// front; nothing is learned from the data beyond validation. A value
/// outside the declared set fails hard at fit and at transform time
/// rather than being encoded as missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdinalEncoder {
    column: String,
    categories: Vec<String>,
    is_fitted: bool,
}

impl OrdinalEncoder {
    pub fn new(column: impl Into<String>, categories: Vec<String>) -> Self {
        Self {
            column: column.into(),
            categories,
            is_fitted: false,
        }
    }

    /// Validate that every observed value is a declared category
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        if self.categories.is_empty() {
            return Err(CinerateError::ConfigError(format!(
                "no categories declared for ordinal column '{}'",
                self.column
            )));
        }

        // fit has no parameters to learn; it exists to surface bad
        // categories before any fold is trained
        self.encode_column(df)?;
        self.is_fitted = true;
        Ok(self)
    }

    /// Produce the n×1 block of category positions
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(CinerateError::ModelNotFitted);
        }

        let codes = self.encode_column(df)?;
        Ok(Array2::from_shape_vec((codes.len(), 1), codes)?)
    }

    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<Array2<f64>> {
        self.fit(df)?;
        self.transform(df)
    }

    pub fn n_categories(&self) -> usize {
        self.categories.len()
    }

    fn encode_column(&self, df: &DataFrame) -> Result<Vec<f64>> {
        let column = df
            .column(&self.column)
            .map_err(|_| CinerateError::FeatureNotFound(self.column.clone()))?;

        let ca = column
            .str()
            .map_err(|e| CinerateError::DataError(e.to_string()))?;

        ca.into_iter()
            .map(|opt| {
                let value = opt.ok_or_else(|| {
                    CinerateError::DataError(format!(
                        "null value in ordinal column '{}'",
                        self.column
                    ))
                })?;
                self.categories
                    .iter()
                    .position(|c| c == value)
                    .map(|pos| pos as f64)
                    .ok_or_else(|| CinerateError::UnknownCategory {
                        column: self.column.clone(),
                        value: value.to_string(),
                    })
            })
            .collect()
    }
}
