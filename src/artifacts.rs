//! Artifact persistence: the ranked search report and the fitted model
//!
//! Writes are all-or-nothing per run: both payloads are fully encoded in
//! memory, staged to temp files, and only then renamed into place. A
//! failure anywhere leaves no partial artifact that looks complete.

use crate::error::{CinerateError, Result};
use crate::model::ModelPipeline;
use crate::search::SearchOutcome;
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Search report file name, one row per candidate
pub const REPORT_FILE: &str = "hyper_param_search_result.csv";

/// Serialized best-pipeline file name
pub const MODEL_FILE: &str = "model.bin";

/// zstd level 3: storage-grade compression at modest encode cost
const MODEL_COMPRESSION_LEVEL: i32 = 3;

/// Writes the two run artifacts into an output directory
pub struct ArtifactWriter {
    out_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Persist the report and the refit pipeline; returns their paths
    pub fn write(&self, outcome: &SearchOutcome) -> Result<(PathBuf, PathBuf)> {
        // encode both payloads before touching the filesystem
        let mut report = build_report(outcome)?;
        let mut report_bytes = Vec::new();
        CsvWriter::new(&mut report_bytes)
            .finish(&mut report)
            .map_err(|e| CinerateError::SerializationError(e.to_string()))?;

        let model_bytes = encode_pipeline(&outcome.best_pipeline)?;

        fs::create_dir_all(&self.out_dir)?;

        let report_path = self.out_dir.join(REPORT_FILE);
        let model_path = self.out_dir.join(MODEL_FILE);

        stage_writes(&[
            (&report_path, report_bytes.as_slice()),
            (&model_path, model_bytes.as_slice()),
        ])?;

        info!(
            report = %report_path.display(),
            model = %model_path.display(),
            "artifacts written"
        );

        Ok((report_path, model_path))
    }
}

/// Load a pipeline previously written by [`ArtifactWriter`]
pub fn load_pipeline(path: &Path) -> Result<ModelPipeline> {
    let compressed = fs::read(path)?;
    let bytes = zstd::decode_all(compressed.as_slice())
        .map_err(|e| CinerateError::SerializationError(format!("zstd decode failed: {}", e)))?;
    let pipeline: ModelPipeline = bincode::deserialize(&bytes)?;
    Ok(pipeline)
}

fn encode_pipeline(pipeline: &ModelPipeline) -> Result<Vec<u8>> {
    let bytes = bincode::serialize(pipeline)?;
    zstd::encode_all(bytes.as_slice(), MODEL_COMPRESSION_LEVEL)
        .map_err(|e| CinerateError::SerializationError(format!("zstd encode failed: {}", e)))
}

/// Build the report frame: one row per candidate, already sorted by
/// descending mean held-out score in the outcome.
fn build_report(outcome: &SearchOutcome) -> Result<DataFrame> {
    let results = &outcome.results;
    let k = outcome.n_folds;

    let mut columns: Vec<Column> = Vec::new();

    let alphas: Vec<f64> = results.iter().map(|r| r.alpha).collect();
    columns.push(Series::new("param_alpha".into(), alphas).into());

    for fold in 0..k {
        let scores: Vec<f64> = results.iter().map(|r| r.test_scores[fold]).collect();
        columns.push(Series::new(format!("split{}_test_score", fold).into(), scores).into());
    }

    let mean_test: Vec<f64> = results.iter().map(|r| r.mean_test_score).collect();
    let std_test: Vec<f64> = results.iter().map(|r| r.std_test_score).collect();
    let ranks: Vec<u32> = results.iter().map(|r| r.rank).collect();
    columns.push(Series::new("mean_test_score".into(), mean_test).into());
    columns.push(Series::new("std_test_score".into(), std_test).into());
    columns.push(Series::new("rank_test_score".into(), ranks).into());

    for fold in 0..k {
        let scores: Vec<f64> = results.iter().map(|r| r.train_scores[fold]).collect();
        columns.push(Series::new(format!("split{}_train_score", fold).into(), scores).into());
    }

    let mean_train: Vec<f64> = results.iter().map(|r| r.mean_train_score).collect();
    let std_train: Vec<f64> = results.iter().map(|r| r.std_train_score).collect();
    columns.push(Series::new("mean_train_score".into(), mean_train).into());
    columns.push(Series::new("std_train_score".into(), std_train).into());

    Ok(DataFrame::new(columns)?)
}

/// Write every payload to a temp sibling, then rename all into place.
/// On failure the temps are removed and nothing final is left behind.
fn stage_writes(files: &[(&Path, &[u8])]) -> Result<()> {
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::new();

    let outcome = (|| -> Result<()> {
        for (path, bytes) in files {
            let tmp = tmp_path(path);
            fs::write(&tmp, bytes)?;
            staged.push((tmp, path.to_path_buf()));
        }
        for (tmp, target) in &staged {
            fs::rename(tmp, target)?;
        }
        Ok(())
    })();

    if outcome.is_err() {
        for (tmp, _) in &staged {
            let _ = fs::remove_file(tmp);
        }
    }

    outcome
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
