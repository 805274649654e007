use anyhow::Result;
use ndarray::Array2;

/// Contract shared by classifier backends: fit once on a labeled feature
/// matrix, then produce class labels or probabilities for new rows. Keeping
/// the contract here lets implementations live next to their backend code.
pub trait ClassifierModel {
    /// Fit the model on a feature matrix and row-aligned class labels.
    fn fit(&mut self, x: &Array2<f32>, y: &[i32]) -> Result<()>;

    /// Predict a class label for each row of `x`.
    fn predict(&self, x: &Array2<f32>) -> Result<Vec<i32>>;

    /// Predict the probability of the greater class label for each row.
    fn predict_proba(&self, x: &Array2<f32>) -> Result<Vec<f32>>;

    /// Short backend identifier, used in log output.
    fn name(&self) -> &str {
        "classifier"
    }
}
