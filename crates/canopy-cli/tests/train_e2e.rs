use std::io::Write;
use std::path::PathBuf;

use canopy_classifiers::ForestConfig;
use canopy_cli::train::{run, TrainConfig, DEFAULT_TEST_FILE, DEFAULT_TRAIN_FILE};

fn write_churn_csv(dir: &std::path::Path, name: &str, rows: usize) {
    let mut file = std::fs::File::create(dir.join(name)).unwrap();
    writeln!(file, "age,income,churn").unwrap();
    for i in 0..rows {
        let churn = i % 2;
        let age = if churn == 1 { 55 + i % 15 } else { 22 + i % 15 };
        let income = if churn == 1 { 18_000 + i * 7 } else { 75_000 + i * 7 };
        writeln!(file, "{},{},{}", age, income, churn).unwrap();
    }
}

fn config(
    train_dir: &std::path::Path,
    test_dir: &std::path::Path,
    model_dir: &std::path::Path,
) -> TrainConfig {
    TrainConfig {
        forest: ForestConfig::new(50, 0),
        model_dir: model_dir.to_path_buf(),
        train_dir: train_dir.to_path_buf(),
        test_dir: test_dir.to_path_buf(),
        train_file: DEFAULT_TRAIN_FILE.to_string(),
        test_file: DEFAULT_TEST_FILE.to_string(),
    }
}

#[test]
fn end_to_end_run_writes_the_model_artifact() {
    let train_dir = tempfile::tempdir().unwrap();
    let test_dir = tempfile::tempdir().unwrap();
    let model_dir = tempfile::tempdir().unwrap();

    write_churn_csv(train_dir.path(), DEFAULT_TRAIN_FILE, 100);
    write_churn_csv(test_dir.path(), DEFAULT_TEST_FILE, 20);

    let config = config(train_dir.path(), test_dir.path(), model_dir.path());
    run(&config).unwrap();

    let artifact: PathBuf = model_dir.path().join("model.joblib");
    assert!(artifact.exists());
}

#[test]
fn missing_train_file_fails_before_any_model_is_written() {
    let train_dir = tempfile::tempdir().unwrap();
    let test_dir = tempfile::tempdir().unwrap();
    let model_dir = tempfile::tempdir().unwrap();

    // No training CSV at all; the test table exists.
    write_churn_csv(test_dir.path(), DEFAULT_TEST_FILE, 20);

    let config = config(train_dir.path(), test_dir.path(), model_dir.path());
    assert!(run(&config).is_err());
    assert!(!model_dir.path().join("model.joblib").exists());
}

#[test]
fn custom_train_file_name_is_honored() {
    let train_dir = tempfile::tempdir().unwrap();
    let test_dir = tempfile::tempdir().unwrap();
    let model_dir = tempfile::tempdir().unwrap();

    // Only the custom name exists; the default would be a missing file.
    write_churn_csv(train_dir.path(), "custom.csv", 60);
    write_churn_csv(test_dir.path(), DEFAULT_TEST_FILE, 20);

    let mut config = config(train_dir.path(), test_dir.path(), model_dir.path());
    config.train_file = "custom.csv".to_string();

    run(&config).unwrap();
    assert!(model_dir.path().join("model.joblib").exists());
}
