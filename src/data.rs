//! Training data loading and validation

use crate::error::{CinerateError, Result};
use crate::preprocessing::FeatureSpec;
use ndarray::Array1;
use polars::prelude::*;
use std::path::Path;

/// Read the training CSV into a frame
pub fn load_training_frame(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(1000))
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    Ok(df)
}

/// Fail early if any column the feature spec names is absent
pub fn validate_columns(df: &DataFrame, spec: &FeatureSpec) -> Result<()> {
    for col_name in spec.required_columns() {
        if df.column(col_name).is_err() {
            return Err(CinerateError::DataError(format!(
                "required column '{}' missing from training data",
                col_name
            )));
        }
    }
    Ok(())
}

/// Extract the target column as f64 values
pub fn extract_target(df: &DataFrame, spec: &FeatureSpec) -> Result<Array1<f64>> {
    let column = df
        .column(&spec.target_column)
        .map_err(|_| CinerateError::FeatureNotFound(spec.target_column.clone()))?;

    let casted = column
        .cast(&DataType::Float64)
        .map_err(|e| CinerateError::DataError(e.to_string()))?;

    let values: Vec<f64> = casted
        .f64()
        .map_err(|e| CinerateError::DataError(e.to_string()))?
        .into_iter()
        .map(|v| {
            v.ok_or_else(|| {
                CinerateError::DataError(format!(
                    "null value in target column '{}'",
                    spec.target_column
                ))
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(Array1::from_vec(values))
}
