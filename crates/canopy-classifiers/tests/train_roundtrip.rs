use std::io::Write;

use canopy_classifiers::io::read_table;
use canopy_classifiers::metrics;
use canopy_classifiers::models::ClassifierModel;
use canopy_classifiers::{ForestClassifier, ForestConfig, MODEL_FILE_NAME};

fn write_churn_csv(dir: &tempfile::TempDir, name: &str, rows: usize) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "age,income,churn").unwrap();
    for i in 0..rows {
        // Older, lower-income customers churn in this synthetic population.
        let churn = i % 2;
        let age = if churn == 1 { 60 + i % 10 } else { 25 + i % 10 };
        let income = if churn == 1 { 20_000 + i * 10 } else { 80_000 + i * 10 };
        writeln!(file, "{},{},{}", age, income, churn).unwrap();
    }
    path
}

#[test]
fn csv_to_fitted_model_to_disk_and_back() {
    let data_dir = tempfile::tempdir().unwrap();
    let model_dir = tempfile::tempdir().unwrap();

    let train_path = write_churn_csv(&data_dir, "train.csv", 100);
    let test_path = write_churn_csv(&data_dir, "test.csv", 20);

    let train = read_table(&train_path).unwrap();
    let test = read_table(&test_path).unwrap();

    // Last column is the label, everything before it a feature.
    assert_eq!(train.feature_names, vec!["age", "income"]);
    assert_eq!(train.label_name, "churn");

    let mut model = ForestClassifier::new(ForestConfig::new(50, 0));
    model.fit(&train.x, &train.y).unwrap();

    let artifact = model.save(model_dir.path()).unwrap();
    assert!(artifact.ends_with(MODEL_FILE_NAME));
    assert!(artifact.exists());

    let predictions = model.predict(&test.x).unwrap();
    let accuracy = metrics::accuracy(&test.y, &predictions);
    assert!((0.0..=1.0).contains(&accuracy));
    // The classes are cleanly separable, so the forest should get them right.
    assert!(accuracy > 0.9);

    let loaded = ForestClassifier::load(model_dir.path()).unwrap();
    assert_eq!(loaded.predict(&test.x).unwrap(), predictions);
}

#[test]
fn fixed_inputs_give_identical_results_across_runs() {
    let data_dir = tempfile::tempdir().unwrap();
    let train_path = write_churn_csv(&data_dir, "train.csv", 60);
    let train = read_table(&train_path).unwrap();

    let run = || {
        let mut model = ForestClassifier::new(ForestConfig::new(25, 0));
        model.fit(&train.x, &train.y).unwrap();
        model.predict_proba(&train.x).unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn distinguishing_label_column_is_excluded_from_features() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("marker.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "f1,f2,the_label").unwrap();
    writeln!(file, "0.5,1.5,1").unwrap();
    writeln!(file, "0.7,1.1,0").unwrap();
    drop(file);

    let data = read_table(&path).unwrap();
    assert!(!data.feature_names.contains(&"the_label".to_string()));
    assert_eq!(data.label_name, "the_label");
    assert_eq!(data.n_features(), 2);
}
