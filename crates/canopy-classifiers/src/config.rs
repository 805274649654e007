use serde::{Deserialize, Serialize};

/// Hyperparameters for the gradient-boosted forest backend.
///
/// Only `n_estimators` and `random_state` are surfaced on the CLI; the
/// remaining knobs keep backend defaults and are carried here so the saved
/// artifact records the full training configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ForestConfig {
    /// Number of boosting iterations, one tree each.
    pub n_estimators: usize,
    /// Accepted and recorded in the artifact. The backend draws no
    /// randomness with data/feature sampling disabled.
    pub random_state: u64,
    pub learning_rate: f32,
    pub max_depth: u32,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            random_state: 0,
            learning_rate: 0.1,
            max_depth: 6,
        }
    }
}

impl ForestConfig {
    pub fn new(n_estimators: usize, random_state: u64) -> Self {
        Self {
            n_estimators,
            random_state,
            ..Self::default()
        }
    }
}
