//! Model: ridge regressor and the composed fit/predict pipeline

mod pipeline;
mod ridge;

pub use pipeline::ModelPipeline;
pub use ridge::RidgeRegression;

use ndarray::Array1;

/// Coefficient of determination (R²).
///
/// Returns 1.0 for a constant target perfectly predicted, and can be
/// arbitrarily negative for predictions worse than the target mean.
pub fn r2_score(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    let y_mean = y_true.mean().unwrap_or(0.0);
    let ss_res = (y_pred - y_true).mapv(|v| v * v).sum();
    let ss_tot = y_true.mapv(|v| (v - y_mean) * (v - y_mean)).sum();

    if ss_tot == 0.0 {
        if ss_res == 0.0 {
            return 1.0;
        }
        return f64::NEG_INFINITY;
    }

    1.0 - ss_res / ss_tot
}
