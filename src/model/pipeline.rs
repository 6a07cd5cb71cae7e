//! The fit/predict unit: composite preprocessor + ridge regressor

use crate::error::{CinerateError, Result};
use crate::model::{r2_score, RidgeRegression};
use crate::preprocessing::{FeaturePreprocessor, FeatureSpec};
use ndarray::Array1;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// One fit/predict unit. Fitting learns the preprocessing state and the
/// regression coefficients together, on the same rows. A fit always
/// starts from scratch, so no learned feature statistics survive across
/// fold or candidate boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPipeline {
    spec: FeatureSpec,
    alpha: f64,
    preprocessor: FeaturePreprocessor,
    regressor: RidgeRegression,
    is_fitted: bool,
}

impl ModelPipeline {
    pub fn new(spec: FeatureSpec, alpha: f64) -> Self {
        let preprocessor = FeaturePreprocessor::new(spec.clone());
        let regressor = RidgeRegression::new(alpha);

        Self {
            spec,
            alpha,
            preprocessor,
            regressor,
            is_fitted: false,
        }
    }

    /// Fit preprocessor then regressor, in that order, on the given rows
    /// only. Previously learned state is discarded first.
    pub fn fit(&mut self, df: &DataFrame, y: &Array1<f64>) -> Result<&mut Self> {
        if df.height() != y.len() {
            return Err(CinerateError::ShapeError {
                expected: format!("{} target values", df.height()),
                actual: format!("{} target values", y.len()),
            });
        }

        self.preprocessor = FeaturePreprocessor::new(self.spec.clone());
        self.regressor = RidgeRegression::new(self.alpha);

        let x = self.preprocessor.fit_transform(df)?;
        self.regressor.fit(&x, y)?;

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform-only preprocessing followed by the linear map
    pub fn predict(&self, df: &DataFrame) -> Result<Array1<f64>> {
        if !self.is_fitted {
            return Err(CinerateError::ModelNotFitted);
        }

        let x = self.preprocessor.transform(df)?;
        self.regressor.predict(&x)
    }

    /// Coefficient of determination on the given rows
    pub fn score(&self, df: &DataFrame, y: &Array1<f64>) -> Result<f64> {
        let y_pred = self.predict(df)?;
        Ok(r2_score(y, &y_pred))
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn spec(&self) -> &FeatureSpec {
        &self.spec
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }
}
