//! In-memory representation of a labeled tabular dataset.
//!
//! A `Dataset` holds the feature matrix, the label vector, and the column
//! names taken from the CSV header. The last column of the source table is
//! the label; everything before it is a feature, by positional convention.
use std::collections::BTreeMap;

use ndarray::Array2;

#[derive(Debug, Clone)]
pub struct Dataset {
    /// Feature matrix, one row per sample.
    pub x: Array2<f32>,
    /// Integer class labels, row-aligned with `x`.
    pub y: Vec<i32>,
    /// Feature column names, in file order.
    pub feature_names: Vec<String>,
    /// Name of the label column (the last column of the source table).
    pub label_name: String,
}

impl Dataset {
    pub fn new(
        x: Array2<f32>,
        y: Vec<i32>,
        feature_names: Vec<String>,
        label_name: String,
    ) -> Self {
        Dataset {
            x,
            y,
            feature_names,
            label_name,
        }
    }

    pub fn nrows(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Number of samples per distinct class label, sorted by label.
    pub fn class_counts(&self) -> BTreeMap<i32, usize> {
        let mut counts = BTreeMap::new();
        for &label in &self.y {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }

    pub fn log_input_data_summary(&self) {
        println!("----- Input Data Summary -----");
        println!("Info: {} rows, {} feature columns", self.nrows(), self.n_features());
        println!("Info: label column is '{}'", self.label_name);
        for (label, count) in self.class_counts() {
            println!("Info: class {}: {} rows", label, count);
        }
        println!("-------------------------------");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn class_counts_are_sorted_by_label() {
        let x = arr2(&[[1.0f32], [2.0], [3.0], [4.0]]);
        let data = Dataset::new(x, vec![1, 0, 1, 1], vec!["f".into()], "label".into());
        let counts = data.class_counts();
        assert_eq!(counts.get(&0), Some(&1));
        assert_eq!(counts.get(&1), Some(&3));
        assert_eq!(counts.keys().copied().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn shape_accessors() {
        let x = arr2(&[[1.0f32, 2.0], [3.0, 4.0]]);
        let data = Dataset::new(
            x,
            vec![0, 1],
            vec!["a".into(), "b".into()],
            "label".into(),
        );
        assert_eq!(data.nrows(), 2);
        assert_eq!(data.n_features(), 2);
    }
}
