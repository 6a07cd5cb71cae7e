//! Command-line interface
//!
//! `cinerate <train> <out>`: fit the review-rating pipeline on the
//! training file, select the regularization strength by cross-validated
//! grid search, and write the search report plus the refit model into
//! the output directory.

use clap::Parser;
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::artifacts::ArtifactWriter;
use crate::data;
use crate::preprocessing::FeatureSpec;
use crate::search::{GridSearch, SearchConfig};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn muted(s: &str) -> ColoredString {
    s.truecolor(140, 140, 140)
}
fn accent(s: &str) -> ColoredString {
    s.truecolor(120, 170, 255)
}
fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), muted(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", muted(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "cinerate")]
#[command(about = "Cross-validated ridge model selection for review rating prediction")]
pub struct Cli {
    /// Path to the training data file
    pub train: PathBuf,

    /// Directory where output should be written to
    pub out: PathBuf,
}

// ─── Train command ─────────────────────────────────────────────────────────────

pub fn cmd_train(train_path: &Path, out_dir: &Path) -> anyhow::Result<()> {
    section("Model selection");

    step_run(&format!("Loading {}", train_path.display()));
    let spec = FeatureSpec::default();
    let df = data::load_training_frame(train_path)?;
    data::validate_columns(&df, &spec)?;
    let y = data::extract_target(&df, &spec)?;
    step_done(&format!("{} rows × {} cols", df.height(), df.width()));

    let config = SearchConfig::default();
    step_run(&format!(
        "Searching {} candidates × {} folds",
        config.alphas.len(),
        config.cv_folds
    ));
    let start = Instant::now();
    let outcome = GridSearch::new(spec, config).run(&df, &y)?;
    step_done(&format!("{:.2?}", start.elapsed()));

    println!();
    println!(
        "  {:<18} {}",
        muted("Best alpha"),
        format!("{}", outcome.best_alpha).white().bold()
    );
    println!(
        "  {:<18} {}",
        muted("Best mean R²"),
        format!("{:.4}", outcome.best_score).white().bold()
    );
    println!();

    step_run(&format!("Writing artifacts → {}", out_dir.display()));
    let (report_path, model_path) = ArtifactWriter::new(out_dir).write(&outcome)?;
    step_done("");

    println!("  {:<18} {}", muted("Report"), report_path.display());
    println!("  {:<18} {}", muted("Model"), model_path.display());
    println!();

    Ok(())
}
