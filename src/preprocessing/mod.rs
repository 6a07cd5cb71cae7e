//! Feature preprocessing
//!
//! One transformer per feature group, composed by [`FeaturePreprocessor`]:
//! - text → token occurrence counts ([`CountVectorizer`])
//! - numeric → zero mean, unit variance ([`StandardScaler`])
//! - ordinal categorical → declared-order integer code ([`OrdinalEncoder`])
//!
//! All learned state (vocabulary, moments) comes from the rows given to
//! `fit`; `transform` never re-fits.

mod compose;
mod config;
mod encoder;
mod scaler;
mod vectorizer;

pub use compose::FeaturePreprocessor;
pub use config::FeatureSpec;
pub use encoder::OrdinalEncoder;
pub use scaler::StandardScaler;
pub use vectorizer::{CountVectorizer, TextTokenizer};
