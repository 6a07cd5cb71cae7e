//! Hyperparameter search
//!
//! Exhaustive enumeration of regularization strengths, each scored by
//! k-fold cross-validation, ranked by mean held-out R², with the winner
//! refit on the full training frame.

mod config;
mod grid;
mod kfold;

pub use config::{alpha_grid, SearchConfig};
pub use grid::{CvResult, GridSearch, SearchOutcome};
pub use kfold::KFold;
