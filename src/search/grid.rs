//! Exhaustive grid search with k-fold cross-validation

use crate::error::{CinerateError, Result};
use crate::model::ModelPipeline;
use crate::preprocessing::FeatureSpec;
use crate::search::{KFold, SearchConfig};
use ndarray::{Array1, Axis};
use polars::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Cross-validation scores for one candidate configuration.
///
/// Train-partition scores are diagnostic only; selection uses the mean
/// held-out score exclusively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvResult {
    pub alpha: f64,
    pub test_scores: Vec<f64>,
    pub train_scores: Vec<f64>,
    pub mean_test_score: f64,
    pub std_test_score: f64,
    pub mean_train_score: f64,
    pub std_train_score: f64,
    /// Competition rank by mean held-out score (1 = best, ties share)
    pub rank: u32,
}

/// Everything the search produced: ranked results and the refit winner
#[derive(Debug)]
pub struct SearchOutcome {
    /// All candidate results, sorted by descending mean held-out score;
    /// candidates with equal scores keep enumeration order
    pub results: Vec<CvResult>,
    pub best_alpha: f64,
    pub best_score: f64,
    pub n_folds: usize,
    /// Pipeline with the best alpha, refit on the entire training frame
    pub best_pipeline: ModelPipeline,
}

/// One materialized fold: immutable row subsets shared read-only by
/// every candidate evaluated against it.
struct Fold {
    train_df: DataFrame,
    valid_df: DataFrame,
    y_train: Array1<f64>,
    y_valid: Array1<f64>,
}

/// Held-out and train-partition score for one (candidate, fold) pair
struct PairScore {
    candidate: usize,
    fold: usize,
    test_score: f64,
    train_score: f64,
}

/// Exhaustive search over the candidate grid.
///
/// Every (candidate, fold) pair fits its own pipeline instance from
/// scratch, so no learned state crosses fold or candidate boundaries.
/// Pairs are evaluated in parallel; all results are collected before any
/// ranking decision, and a failure in any pair aborts the whole search.
pub struct GridSearch {
    spec: FeatureSpec,
    config: SearchConfig,
}

impl GridSearch {
    pub fn new(spec: FeatureSpec, config: SearchConfig) -> Self {
        Self { spec, config }
    }

    pub fn run(&self, df: &DataFrame, y: &Array1<f64>) -> Result<SearchOutcome> {
        if self.config.alphas.is_empty() {
            return Err(CinerateError::ConfigError(
                "candidate grid is empty".to_string(),
            ));
        }
        if df.height() != y.len() {
            return Err(CinerateError::ShapeError {
                expected: format!("{} target values", df.height()),
                actual: format!("{} target values", y.len()),
            });
        }

        let n_candidates = self.config.alphas.len();
        let n_folds = self.config.cv_folds;

        let splits = KFold::new(n_folds).split(df.height())?;
        let folds = materialize_folds(df, y, &splits)?;

        info!(
            candidates = n_candidates,
            folds = n_folds,
            fits = n_candidates * n_folds,
            "starting hyperparameter search"
        );

        let pairs: Vec<(usize, usize)> = (0..n_candidates)
            .flat_map(|c| (0..n_folds).map(move |f| (c, f)))
            .collect();

        let pair_scores: Vec<PairScore> = pairs
            .into_par_iter()
            .map(|(candidate, fold_idx)| {
                self.evaluate_pair(candidate, fold_idx, &folds[fold_idx])
            })
            .collect::<Result<Vec<_>>>()?;

        let mut results = self.aggregate(pair_scores, n_folds);

        // stable sort: equal means keep enumeration order, so the
        // first-enumerated candidate wins ties
        results.sort_by(|a, b| {
            b.mean_test_score
                .partial_cmp(&a.mean_test_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        assign_ranks(&mut results);

        let best_alpha = results[0].alpha;
        let best_score = results[0].mean_test_score;
        info!(alpha = best_alpha, score = best_score, "best candidate selected");

        let mut best_pipeline = ModelPipeline::new(self.spec.clone(), best_alpha);
        best_pipeline.fit(df, y)?;

        Ok(SearchOutcome {
            results,
            best_alpha,
            best_score,
            n_folds,
            best_pipeline,
        })
    }

    fn evaluate_pair(&self, candidate: usize, fold_idx: usize, fold: &Fold) -> Result<PairScore> {
        let alpha = self.config.alphas[candidate];

        let mut pipeline = ModelPipeline::new(self.spec.clone(), alpha);
        pipeline.fit(&fold.train_df, &fold.y_train)?;

        let test_score = pipeline.score(&fold.valid_df, &fold.y_valid)?;
        let train_score = pipeline.score(&fold.train_df, &fold.y_train)?;

        debug!(alpha, fold = fold_idx, test_score, "fold evaluated");

        Ok(PairScore {
            candidate,
            fold: fold_idx,
            test_score,
            train_score,
        })
    }

    fn aggregate(&self, pair_scores: Vec<PairScore>, n_folds: usize) -> Vec<CvResult> {
        let n_candidates = self.config.alphas.len();
        let mut test_scores = vec![vec![0.0; n_folds]; n_candidates];
        let mut train_scores = vec![vec![0.0; n_folds]; n_candidates];

        for pair in pair_scores {
            test_scores[pair.candidate][pair.fold] = pair.test_score;
            train_scores[pair.candidate][pair.fold] = pair.train_score;
        }

        self.config
            .alphas
            .iter()
            .enumerate()
            .map(|(c, &alpha)| {
                let (mean_test_score, std_test_score) = mean_std(&test_scores[c]);
                let (mean_train_score, std_train_score) = mean_std(&train_scores[c]);
                CvResult {
                    alpha,
                    test_scores: test_scores[c].clone(),
                    train_scores: train_scores[c].clone(),
                    mean_test_score,
                    std_test_score,
                    mean_train_score,
                    std_train_score,
                    rank: 0,
                }
            })
            .collect()
    }
}

fn materialize_folds(
    df: &DataFrame,
    y: &Array1<f64>,
    splits: &[(Vec<usize>, Vec<usize>)],
) -> Result<Vec<Fold>> {
    splits
        .iter()
        .map(|(train, valid)| {
            Ok(Fold {
                train_df: take_rows(df, train)?,
                valid_df: take_rows(df, valid)?,
                y_train: y.select(Axis(0), train),
                y_valid: y.select(Axis(0), valid),
            })
        })
        .collect()
}

fn take_rows(df: &DataFrame, indices: &[usize]) -> Result<DataFrame> {
    let idx = IdxCa::from_vec(
        "idx".into(),
        indices.iter().map(|&i| i as IdxSize).collect(),
    );
    Ok(df.take(&idx)?)
}

/// Mean and population standard deviation
fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, var.sqrt())
}

/// Competition ranking over a descending-sorted result list
fn assign_ranks(results: &mut [CvResult]) {
    let mut rank = 1;
    for i in 0..results.len() {
        if i > 0 && results[i].mean_test_score < results[i - 1].mean_test_score {
            rank = i as u32 + 1;
        }
        results[i].rank = rank;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review_frame(n: usize) -> (DataFrame, Array1<f64>) {
        let sentiments = ["neg", "compound", "neu", "pos"];
        let texts = [
            "terrible boring waste",
            "mixed feelings overall",
            "decent enough film",
            "brilliant moving masterpiece",
        ];

        let mut id = Vec::with_capacity(n);
        let mut author = Vec::with_capacity(n);
        let mut text = Vec::with_capacity(n);
        let mut n_words = Vec::with_capacity(n);
        let mut sentiment = Vec::with_capacity(n);
        let mut rating = Vec::with_capacity(n);

        for i in 0..n {
            let s = i % 4;
            id.push(i as i64);
            author.push(format!("author{}", i % 7));
            text.push(texts[s].to_string());
            n_words.push((10 + (i % 40)) as i64);
            sentiment.push(sentiments[s].to_string());
            rating.push(1.0 + 2.5 * s as f64 + (i % 3) as f64 * 0.2);
        }

        let df = df!(
            "Id" => &id,
            "Author" => &author,
            "Text" => &text,
            "n_words" => &n_words,
            "sentiment" => &sentiment,
            "Rating" => &rating,
        )
        .unwrap();

        let y = Array1::from_vec(rating);
        (df, y)
    }

    #[test]
    fn test_one_result_per_candidate() {
        let (df, y) = review_frame(40);
        let config = SearchConfig::default().with_cv_folds(4);
        let outcome = GridSearch::new(FeatureSpec::default(), config)
            .run(&df, &y)
            .unwrap();

        assert_eq!(outcome.results.len(), 10);
        assert_eq!(outcome.n_folds, 4);
        for result in &outcome.results {
            assert_eq!(result.test_scores.len(), 4);
            assert_eq!(result.train_scores.len(), 4);
        }
    }

    #[test]
    fn test_ranking_is_descending_and_best_is_max() {
        let (df, y) = review_frame(40);
        let config = SearchConfig::default().with_cv_folds(4);
        let outcome = GridSearch::new(FeatureSpec::default(), config)
            .run(&df, &y)
            .unwrap();

        for pair in outcome.results.windows(2) {
            assert!(pair[0].mean_test_score >= pair[1].mean_test_score);
        }

        let max = outcome
            .results
            .iter()
            .map(|r| r.mean_test_score)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(outcome.best_score, max);
        assert_eq!(outcome.results[0].rank, 1);
    }

    #[test]
    fn test_ranking_tie_first_seen_wins() {
        // duplicate candidates score identically; the first-enumerated
        // one must come out on top and share its rank
        let (df, y) = review_frame(24);
        let config = SearchConfig::new()
            .with_alphas(vec![700.0, 700.0, 500.0])
            .with_cv_folds(3);
        let outcome = GridSearch::new(FeatureSpec::default(), config)
            .run(&df, &y)
            .unwrap();

        let seven_hundreds: Vec<usize> = outcome
            .results
            .iter()
            .enumerate()
            .filter(|(_, r)| r.alpha == 700.0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(seven_hundreds.len(), 2);
        assert_eq!(outcome.results[seven_hundreds[0]].rank, outcome.results[seven_hundreds[1]].rank);

        if outcome.best_score == outcome.results[1].mean_test_score {
            // tie at the top: enumeration order decides
            assert_eq!(outcome.best_alpha, 700.0);
        }
    }

    #[test]
    fn test_unknown_category_aborts_search() {
        let (df, y) = review_frame(20);
        // a spec that does not declare two of the sentiment values in
        // the data: some fold must fail, and the whole search with it
        let spec = FeatureSpec::default().with_ordinal(
            "sentiment",
            vec!["neg".to_string(), "pos".to_string()],
        );
        let config = SearchConfig::new().with_alphas(vec![500.0]).with_cv_folds(4);

        let result = GridSearch::new(spec, config).run(&df, &y);
        assert!(matches!(
            result,
            Err(CinerateError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_fewer_rows_than_folds_is_config_error() {
        let (df, y) = review_frame(4);
        let config = SearchConfig::default().with_cv_folds(5);
        let result = GridSearch::new(FeatureSpec::default(), config).run(&df, &y);
        assert!(matches!(result, Err(CinerateError::ConfigError(_))));
    }

    #[test]
    fn test_empty_grid_is_config_error() {
        let (df, y) = review_frame(20);
        let config = SearchConfig::new().with_alphas(Vec::new());
        let result = GridSearch::new(FeatureSpec::default(), config).run(&df, &y);
        assert!(matches!(result, Err(CinerateError::ConfigError(_))));
    }

    #[test]
    fn test_best_pipeline_is_refit_on_full_frame() {
        let (df, y) = review_frame(32);
        let config = SearchConfig::new()
            .with_alphas(vec![500.0, 950.0])
            .with_cv_folds(4);
        let outcome = GridSearch::new(FeatureSpec::default(), config)
            .run(&df, &y)
            .unwrap();

        assert!(outcome.best_pipeline.is_fitted());
        assert_eq!(outcome.best_pipeline.alpha(), outcome.best_alpha);

        // refitting by hand on the full frame reproduces the artifact
        let mut manual = ModelPipeline::new(FeatureSpec::default(), outcome.best_alpha);
        manual.fit(&df, &y).unwrap();
        assert_eq!(
            manual.predict(&df).unwrap(),
            outcome.best_pipeline.predict(&df).unwrap()
        );
    }

    #[test]
    fn test_search_is_deterministic() {
        let (df, y) = review_frame(30);
        let config = SearchConfig::new()
            .with_alphas(vec![500.0, 600.0, 700.0])
            .with_cv_folds(3);

        let a = GridSearch::new(FeatureSpec::default(), config.clone())
            .run(&df, &y)
            .unwrap();
        let b = GridSearch::new(FeatureSpec::default(), config).run(&df, &y).unwrap();

        let means_a: Vec<f64> = a.results.iter().map(|r| r.mean_test_score).collect();
        let means_b: Vec<f64> = b.results.iter().map(|r| r.mean_test_score).collect();
        assert_eq!(means_a, means_b);
        assert_eq!(a.best_alpha, b.best_alpha);
    }
}
