//! cinerate - Cross-validated ridge model selection for review rating
//! prediction
//!
//! Fits a regularized linear regression that predicts a numeric review
//! rating from free-text, word-count, and ordinal sentiment features.
//! The regularization strength is chosen by exhaustive grid search with
//! k-fold cross-validation, and the run persists two artifacts: a ranked
//! search report and the winning pipeline refit on the full training
//! frame.
//!
//! # Modules
//!
//! - [`preprocessing`] - Per-feature-group transforms and their composition
//! - [`model`] - Ridge regressor and the composed fit/predict pipeline
//! - [`search`] - Grid enumeration, k-fold splitting, parallel evaluation
//! - [`artifacts`] - Report and model persistence
//! - [`data`] - Training CSV loading and validation
//! - [`cli`] - Command-line interface

pub mod error;

pub mod artifacts;
pub mod data;
pub mod model;
pub mod preprocessing;
pub mod search;

pub mod cli;

pub use error::{CinerateError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{CinerateError, Result};

    pub use crate::preprocessing::{FeaturePreprocessor, FeatureSpec};

    pub use crate::model::{r2_score, ModelPipeline, RidgeRegression};

    pub use crate::search::{CvResult, GridSearch, KFold, SearchConfig, SearchOutcome};

    pub use crate::artifacts::{load_pipeline, ArtifactWriter};
}
