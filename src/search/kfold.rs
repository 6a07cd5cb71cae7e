//! Deterministic k-fold partitioning

use crate::error::{CinerateError, Result};

/// Splits row indices into k disjoint, contiguous folds.
///
/// No shuffling: the same fold count over the same row count always
/// yields the same partition. The first `n mod k` folds take one extra
/// row, so every row lands in exactly one validation fold.
#[derive(Debug, Clone, Copy)]
pub struct KFold {
    n_splits: usize,
}

impl KFold {
    pub fn new(n_splits: usize) -> Self {
        Self { n_splits }
    }

    /// Produce (train_indices, validation_indices) per fold
    pub fn split(&self, n_rows: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        if self.n_splits < 2 {
            return Err(CinerateError::ConfigError(format!(
                "k-fold cross-validation requires at least 2 folds, got {}",
                self.n_splits
            )));
        }
        if n_rows < self.n_splits {
            return Err(CinerateError::ConfigError(format!(
                "cannot split {} rows into {} folds",
                n_rows, self.n_splits
            )));
        }

        let base = n_rows / self.n_splits;
        let remainder = n_rows % self.n_splits;

        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;

        for fold_idx in 0..self.n_splits {
            let size = if fold_idx < remainder { base + 1 } else { base };
            let stop = start + size;

            let valid: Vec<usize> = (start..stop).collect();
            let train: Vec<usize> = (0..start).chain(stop..n_rows).collect();

            folds.push((train, valid));
            start = stop;
        }

        Ok(folds)
    }
}
