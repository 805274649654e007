//! Flag/environment resolution and the single-shot training flow.
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use log::info;

use canopy_classifiers::io::read_dataset;
use canopy_classifiers::metrics::{self, ClassificationReport};
use canopy_classifiers::models::ClassifierModel;
use canopy_classifiers::{ForestClassifier, ForestConfig};

/// Environment variables consulted when the matching flag is absent.
/// These follow the SageMaker training-container channel convention.
pub const MODEL_DIR_ENV: &str = "SM_MODEL_DIR";
pub const TRAIN_DIR_ENV: &str = "SM_CHANNEL_TRAIN";
pub const TEST_DIR_ENV: &str = "SM_CHANNEL_TEST";

pub const DEFAULT_TRAIN_FILE: &str = "train-V-1.csv";
pub const DEFAULT_TEST_FILE: &str = "test-V-1.csv";

/// Raw intake from the command line, before environment fallback.
#[derive(Debug, Clone)]
pub struct TrainArgs {
    pub n_estimators: usize,
    pub random_state: u64,
    pub model_dir: Option<PathBuf>,
    pub train_dir: Option<PathBuf>,
    pub test_dir: Option<PathBuf>,
    pub train_file: String,
    pub test_file: String,
}

/// Fully resolved run configuration, immutable after parse.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub forest: ForestConfig,
    pub model_dir: PathBuf,
    pub train_dir: PathBuf,
    pub test_dir: PathBuf,
    pub train_file: String,
    pub test_file: String,
}

impl TrainArgs {
    /// Resolve environment fallbacks for the three path fields.
    pub fn resolve(self) -> Result<TrainConfig> {
        Ok(TrainConfig {
            forest: ForestConfig::new(self.n_estimators, self.random_state),
            model_dir: resolve_dir(self.model_dir, MODEL_DIR_ENV, "--model-dir")?,
            train_dir: resolve_dir(self.train_dir, TRAIN_DIR_ENV, "--train")?,
            test_dir: resolve_dir(self.test_dir, TEST_DIR_ENV, "--test")?,
            train_file: self.train_file,
            test_file: self.test_file,
        })
    }
}

fn resolve_dir(flag: Option<PathBuf>, env_var: &str, flag_name: &str) -> Result<PathBuf> {
    let env_value = std::env::var_os(env_var).map(PathBuf::from);
    resolve_dir_with(flag, env_value, env_var, flag_name)
}

fn resolve_dir_with(
    flag: Option<PathBuf>,
    env_value: Option<PathBuf>,
    env_var: &str,
    flag_name: &str,
) -> Result<PathBuf> {
    flag.or(env_value).ok_or_else(|| {
        anyhow!(
            "No directory given: pass {} or set the {} environment variable",
            flag_name,
            env_var
        )
    })
}

/// Run the straight-line training flow: load both tables, fit, persist,
/// evaluate, print. Any failure propagates and ends the run.
pub fn run(config: &TrainConfig) -> Result<()> {
    println!("canopy version: {}", env!("CARGO_PKG_VERSION"));

    info!("reading data");
    let train = read_dataset(&config.train_dir, &config.train_file)
        .context("Failed to load training data")?;
    let test =
        read_dataset(&config.test_dir, &config.test_file).context("Failed to load test data")?;

    println!("Column order: {:?}", train.feature_names);
    train.log_input_data_summary();

    let mut model = ForestClassifier::new(config.forest.clone());
    info!(
        "training {} (n_estimators={}, random_state={})",
        model.name(),
        config.forest.n_estimators,
        config.forest.random_state
    );
    model.fit(&train.x, &train.y)?;

    let model_path = model.save(&config.model_dir)?;
    println!("Model persisted at {}", model_path.display());

    let predictions = model.predict(&test.x)?;
    let test_accuracy = metrics::accuracy(&test.y, &predictions);
    let report = ClassificationReport::from_predictions(&test.y, &predictions)?;

    println!();
    println!("------ METRICS RESULTS FOR TESTING DATA ------");
    println!();
    println!("Total rows are: {}", test.nrows());
    println!("[TESTING] Model accuracy is: {}", test_accuracy);
    println!("[TESTING] Testing report:");
    println!("{}", report);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn flag_wins_over_environment() {
        let resolved = resolve_dir_with(
            Some(PathBuf::from("/from/flag")),
            Some(PathBuf::from("/from/env")),
            MODEL_DIR_ENV,
            "--model-dir",
        )
        .unwrap();
        assert_eq!(resolved, Path::new("/from/flag"));
    }

    #[test]
    fn environment_fills_in_for_missing_flag() {
        let resolved = resolve_dir_with(
            None,
            Some(PathBuf::from("/from/env")),
            TRAIN_DIR_ENV,
            "--train",
        )
        .unwrap();
        assert_eq!(resolved, Path::new("/from/env"));
    }

    #[test]
    fn missing_flag_and_environment_is_an_error() {
        let err =
            resolve_dir_with(None, None, TEST_DIR_ENV, "--test").unwrap_err();
        assert!(err.to_string().contains("--test"));
        assert!(err.to_string().contains(TEST_DIR_ENV));
    }
}
