//! Composite preprocessing: routes feature groups to transformers and
//! concatenates their outputs into one feature matrix.

use crate::error::{CinerateError, Result};
use crate::preprocessing::{CountVectorizer, FeatureSpec, OrdinalEncoder, StandardScaler};
use ndarray::{concatenate, Array2, Axis};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Applies the per-group transforms declared in a [`FeatureSpec`] and
/// joins the resulting blocks column-wise, preserving row order.
///
/// Block order is fixed: text counts, standardized numerics, ordinal
/// code. Columns not assigned to a group are never read; the learned
/// state of each transformer is mutated only during `fit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturePreprocessor {
    spec: FeatureSpec,
    vectorizer: CountVectorizer,
    scaler: StandardScaler,
    encoder: OrdinalEncoder,
    is_fitted: bool,
}

impl FeaturePreprocessor {
    pub fn new(spec: FeatureSpec) -> Self {
        let vectorizer = CountVectorizer::new(spec.max_vocabulary);
        let scaler = StandardScaler::new(spec.numeric_columns.clone());
        let encoder = OrdinalEncoder::new(
            spec.ordinal_column.clone(),
            spec.ordinal_categories.clone(),
        );

        Self {
            spec,
            vectorizer,
            scaler,
            encoder,
            is_fitted: false,
        }
    }

    /// Fit every transformer on its designated column(s) of the frame
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        let documents = extract_documents(df, &self.spec.text_column)?;

        self.vectorizer.fit(&documents)?;
        self.scaler.fit(df)?;
        self.encoder.fit(df)?;

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform-only application of the fitted transformers
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(CinerateError::ModelNotFitted);
        }

        let documents = extract_documents(df, &self.spec.text_column)?;

        let text_block = self.vectorizer.transform(&documents)?;
        let numeric_block = self.scaler.transform(df)?;
        let ordinal_block = self.encoder.transform(df)?;

        let matrix = concatenate(
            Axis(1),
            &[text_block.view(), numeric_block.view(), ordinal_block.view()],
        )?;

        Ok(matrix)
    }

    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<Array2<f64>> {
        self.fit(df)?;
        self.transform(df)
    }

    /// Width of the feature matrix once fitted
    pub fn n_features(&self) -> usize {
        self.vectorizer.vocabulary_size() + self.scaler.n_features() + 1
    }

    pub fn spec(&self) -> &FeatureSpec {
        &self.spec
    }
}

/// Pull the text column out as owned documents; a null entry counts as
/// an empty document.
fn extract_documents(df: &DataFrame, col_name: &str) -> Result<Vec<String>> {
    let column = df
        .column(col_name)
        .map_err(|_| CinerateError::FeatureNotFound(col_name.to_string()))?;

    let ca = column
        .str()
        .map_err(|e| CinerateError::DataError(e.to_string()))?;

    Ok(ca
        .into_iter()
        .map(|opt| opt.unwrap_or("").to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review_frame() -> DataFrame {
        df!(
            "Id" => &[1i64, 2, 3, 4],
            "Author" => &["ada", "ben", "cho", "dee"],
            "Text" => &["great fun film", "dull and slow", "great cast", "slow plot"],
            "n_words" => &[3i64, 3, 2, 2],
            "sentiment" => &["pos", "neg", "pos", "neu"],
            "Rating" => &[9.0, 3.0, 8.0, 5.0],
        )
        .unwrap()
    }

    #[test]
    fn test_row_count_preserved() {
        let df = review_frame();
        let mut preprocessor = FeaturePreprocessor::new(FeatureSpec::default());
        let matrix = preprocessor.fit_transform(&df).unwrap();
        assert_eq!(matrix.nrows(), df.height());
    }

    #[test]
    fn test_column_count_invariant_for_fixed_fit() {
        let df = review_frame();
        let mut preprocessor = FeaturePreprocessor::new(FeatureSpec::default());
        preprocessor.fit(&df).unwrap();

        let full = preprocessor.transform(&df).unwrap();
        let head = preprocessor.transform(&df.head(Some(2))).unwrap();

        assert_eq!(full.ncols(), head.ncols());
        assert_eq!(full.ncols(), preprocessor.n_features());
    }

    #[test]
    fn test_unassigned_columns_excluded() {
        // vocabulary + n_words + sentiment code; Id/Author contribute nothing
        let df = review_frame();
        let mut preprocessor = FeaturePreprocessor::new(FeatureSpec::default());
        let matrix = preprocessor.fit_transform(&df).unwrap();

        let vocab = {
            let mut v = FeaturePreprocessor::new(FeatureSpec::default());
            v.fit(&df).unwrap();
            v.vectorizer.vocabulary_size()
        };
        assert_eq!(matrix.ncols(), vocab + 1 + 1);
    }

    #[test]
    fn test_missing_required_column_fails() {
        let df = df!(
            "Text" => &["a film"],
            "sentiment" => &["pos"],
            "Rating" => &[5.0],
        )
        .unwrap();

        let mut preprocessor = FeaturePreprocessor::new(FeatureSpec::default());
        assert!(matches!(
            preprocessor.fit(&df),
            Err(CinerateError::FeatureNotFound(_))
        ));
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let preprocessor = FeaturePreprocessor::new(FeatureSpec::default());
        assert!(matches!(
            preprocessor.transform(&review_frame()),
            Err(CinerateError::ModelNotFitted)
        ));
    }

    #[test]
    fn test_null_text_treated_as_empty() {
        let df = df!(
            "Text" => &[Some("fine film"), None::<&str>],
            "n_words" => &[2i64, 0],
            "sentiment" => &["pos", "neg"],
            "Rating" => &[7.0, 2.0],
        )
        .unwrap();

        let mut preprocessor = FeaturePreprocessor::new(FeatureSpec::default());
        let matrix = preprocessor.fit_transform(&df).unwrap();

        // the null document contributes an all-zero count row
        let vocab = preprocessor.vectorizer.vocabulary_size();
        assert!(matrix.row(1).iter().take(vocab).all(|&v| v == 0.0));
    }
}
