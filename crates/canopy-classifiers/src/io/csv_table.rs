//! Comma-delimited table reader.
//!
//! Tables carry a header row. The final column is the label; all preceding
//! columns are features. Train and test tables are read independently and
//! no schema agreement between them is checked.
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use ndarray::Array2;

use crate::data_handling::Dataset;

/// Read a labeled CSV table from `dir/file`.
pub fn read_dataset<P: AsRef<Path>>(dir: P, file: &str) -> Result<Dataset> {
    read_table(dir.as_ref().join(file))
}

/// Read a labeled CSV table into a `Dataset`.
///
/// Features parse as `f32`, the label as `i32`. Any missing, unreadable,
/// or malformed input is an error with row/column context.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&path)
        .with_context(|| format!("Failed to open CSV file: {}", path.as_ref().display()))?;

    let headers = reader
        .headers()
        .context("Failed to read CSV header row")?
        .clone();

    if headers.len() < 2 {
        return Err(anyhow!(
            "Expected at least one feature column and a label column, found {} column(s) in {}",
            headers.len(),
            path.as_ref().display()
        ));
    }

    let label_idx = headers.len() - 1;
    let feature_names: Vec<String> = headers
        .iter()
        .take(label_idx)
        .map(|name| name.to_string())
        .collect();
    let label_name = headers
        .get(label_idx)
        .unwrap_or_default()
        .to_string();

    let mut features = Vec::new();
    let mut labels = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        for idx in 0..label_idx {
            let value = record
                .get(idx)
                .ok_or_else(|| anyhow!("Missing feature value at row {}", row_idx + 1))?;
            let parsed = value.trim().parse::<f32>().with_context(|| {
                format!(
                    "Invalid feature '{}' at row {}",
                    headers.get(idx).unwrap_or(""),
                    row_idx + 1
                )
            })?;
            features.push(parsed);
        }

        let label = record
            .get(label_idx)
            .ok_or_else(|| anyhow!("Missing label value at row {}", row_idx + 1))?
            .trim()
            .parse::<i32>()
            .with_context(|| format!("Invalid label at row {}", row_idx + 1))?;
        labels.push(label);
    }

    let n_samples = labels.len();
    let x = Array2::from_shape_vec((n_samples, label_idx), features)
        .context("Failed to build feature matrix")?;

    Ok(Dataset::new(x, labels, feature_names, label_name))
}
