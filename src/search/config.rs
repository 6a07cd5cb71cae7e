//! Search configuration

use serde::{Deserialize, Serialize};

/// Enumerate `start, start + step, …` up to but excluding `stop`
pub fn alpha_grid(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let mut values = Vec::new();
    let mut v = start;
    while v < stop {
        values.push(v);
        v += step;
    }
    values
}

/// Configuration for the hyperparameter grid search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Candidate regularization strengths, in enumeration order
    pub alphas: Vec<f64>,

    /// Cross-validation fold count
    pub cv_folds: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            alphas: alpha_grid(500.0, 1000.0, 50.0),
            cv_folds: 5,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the candidate grid
    pub fn with_alphas(mut self, alphas: Vec<f64>) -> Self {
        self.alphas = alphas;
        self
    }

    /// Builder method to set the fold count
    pub fn with_cv_folds(mut self, cv_folds: usize) -> Self {
        self.cv_folds = cv_folds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let config = SearchConfig::default();
        assert_eq!(config.alphas.len(), 10);
        assert_eq!(config.alphas[0], 500.0);
        assert_eq!(config.alphas[9], 950.0);
        assert_eq!(config.cv_folds, 5);
    }

    #[test]
    fn test_grid_excludes_upper_bound() {
        let grid = alpha_grid(500.0, 1000.0, 50.0);
        assert!(!grid.contains(&1000.0));
        assert_eq!(grid, vec![
            500.0, 550.0, 600.0, 650.0, 700.0, 750.0, 800.0, 850.0, 900.0, 950.0
        ]);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::new()
            .with_alphas(vec![1.0, 2.0])
            .with_cv_folds(3);
        assert_eq!(config.alphas, vec![1.0, 2.0]);
        assert_eq!(config.cv_folds, 3);
    }
}
