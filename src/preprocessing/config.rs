//! Feature specification

use serde::{Deserialize, Serialize};

/// Maps each feature group to its column(s) and transform configuration.
///
/// This is process-wide configuration, fixed for a run: the pipeline and
/// every candidate evaluated by the search share one spec. Columns listed
/// in `drop_columns` (and any column not named here at all) are excluded
/// from modeling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    /// Free-text column, count-vectorized
    pub text_column: String,

    /// Numeric columns, standardized to zero mean and unit variance
    pub numeric_columns: Vec<String>,

    /// Ordinal categorical column
    pub ordinal_column: String,

    /// Declared total order of the ordinal categories; a value outside
    /// this set is a hard error at fit and transform time
    pub ordinal_categories: Vec<String>,

    /// Identifier columns excluded from modeling
    pub drop_columns: Vec<String>,

    /// Target column
    pub target_column: String,

    /// Vocabulary cap for the text vectorizer
    pub max_vocabulary: usize,
}

impl Default for FeatureSpec {
    fn default() -> Self {
        Self {
            text_column: "Text".to_string(),
            numeric_columns: vec!["n_words".to_string()],
            ordinal_column: "sentiment".to_string(),
            ordinal_categories: vec![
                "neg".to_string(),
                "compound".to_string(),
                "neu".to_string(),
                "pos".to_string(),
            ],
            drop_columns: vec!["Id".to_string(), "Author".to_string()],
            target_column: "Rating".to_string(),
            max_vocabulary: 20_000,
        }
    }
}

impl FeatureSpec {
    /// Create the default review-rating spec
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the text column
    pub fn with_text_column(mut self, name: impl Into<String>) -> Self {
        self.text_column = name.into();
        self
    }

    /// Builder method to set the numeric columns
    pub fn with_numeric_columns(mut self, names: Vec<String>) -> Self {
        self.numeric_columns = names;
        self
    }

    /// Builder method to set the ordinal column and its category order
    pub fn with_ordinal(mut self, name: impl Into<String>, categories: Vec<String>) -> Self {
        self.ordinal_column = name.into();
        self.ordinal_categories = categories;
        self
    }

    /// Builder method to set the target column
    pub fn with_target(mut self, name: impl Into<String>) -> Self {
        self.target_column = name.into();
        self
    }

    /// Builder method to set the vocabulary cap
    pub fn with_max_vocabulary(mut self, n: usize) -> Self {
        self.max_vocabulary = n;
        self
    }

    /// All columns the input frame must contain for this spec. The drop
    /// columns are part of the input contract even though they are never
    /// modeled.
    pub fn required_columns(&self) -> Vec<&str> {
        let mut cols: Vec<&str> = vec![self.text_column.as_str()];
        cols.extend(self.numeric_columns.iter().map(|s| s.as_str()));
        cols.push(self.ordinal_column.as_str());
        cols.extend(self.drop_columns.iter().map(|s| s.as_str()));
        cols.push(self.target_column.as_str());
        cols
    }
}
