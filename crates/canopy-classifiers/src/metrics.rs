//! Classification metrics: accuracy and a per-class report.
use std::collections::BTreeMap;
use std::fmt;

use anyhow::{anyhow, Result};

/// Proportion of predictions matching the true labels. 0.0 for empty input.
pub fn accuracy(y_true: &[i32], y_pred: &[i32]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    correct as f64 / y_true.len() as f64
}

/// Per-class precision, recall, and F1 score.
#[derive(Debug, Clone)]
pub struct ClassMetrics {
    /// The class label as it appears in the data.
    pub class: i32,
    /// Precision: TP / (TP + FP). 0.0 if the class was never predicted.
    pub precision: f64,
    /// Recall: TP / (TP + FN). 0.0 if the class has no true samples.
    pub recall: f64,
    /// F1: harmonic mean of precision and recall. 0.0 if both are zero.
    pub f1: f64,
    /// Number of true samples in this class.
    pub support: usize,
}

/// Textual per-class summary in the familiar classification-report layout.
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    classes: Vec<ClassMetrics>,
    accuracy: f64,
    n_samples: usize,
}

impl ClassificationReport {
    /// Build a report from row-aligned true and predicted labels.
    ///
    /// Classes are the union of labels seen in either slice, sorted.
    pub fn from_predictions(y_true: &[i32], y_pred: &[i32]) -> Result<Self> {
        if y_true.is_empty() {
            return Err(anyhow!("Cannot build a classification report from zero samples"));
        }
        if y_true.len() != y_pred.len() {
            return Err(anyhow!(
                "Label length mismatch: {} true vs {} predicted",
                y_true.len(),
                y_pred.len()
            ));
        }

        // matrix[(true, predicted)] sample counts
        let mut matrix: BTreeMap<(i32, i32), usize> = BTreeMap::new();
        let mut class_set = std::collections::BTreeSet::new();
        for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
            *matrix.entry((t, p)).or_insert(0) += 1;
            class_set.insert(t);
            class_set.insert(p);
        }

        let classes = class_set
            .iter()
            .map(|&c| {
                let tp = *matrix.get(&(c, c)).unwrap_or(&0);
                let fp: usize = matrix
                    .iter()
                    .filter(|&(&(t, p), _)| p == c && t != c)
                    .map(|(_, &count)| count)
                    .sum();
                let fn_: usize = matrix
                    .iter()
                    .filter(|&(&(t, p), _)| t == c && p != c)
                    .map(|(_, &count)| count)
                    .sum();
                let support = tp + fn_;
                let precision = if tp + fp == 0 {
                    0.0
                } else {
                    tp as f64 / (tp + fp) as f64
                };
                let recall = if support == 0 {
                    0.0
                } else {
                    tp as f64 / support as f64
                };
                let f1 = if precision + recall == 0.0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                };
                ClassMetrics {
                    class: c,
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect();

        Ok(Self {
            classes,
            accuracy: accuracy(y_true, y_pred),
            n_samples: y_true.len(),
        })
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn classes(&self) -> &[ClassMetrics] {
        &self.classes
    }

    /// Unweighted mean of (precision, recall, f1) over classes.
    pub fn macro_avg(&self) -> (f64, f64, f64) {
        let n = self.classes.len() as f64;
        let (p, r, f) = self.sum_metrics(|_| 1.0);
        (p / n, r / n, f / n)
    }

    /// Support-weighted mean of (precision, recall, f1) over classes.
    pub fn weighted_avg(&self) -> (f64, f64, f64) {
        let total = self.n_samples as f64;
        let (p, r, f) = self.sum_metrics(|m| m.support as f64);
        (p / total, r / total, f / total)
    }

    fn sum_metrics<F: Fn(&ClassMetrics) -> f64>(&self, weight: F) -> (f64, f64, f64) {
        self.classes.iter().fold((0.0, 0.0, 0.0), |acc, m| {
            let w = weight(m);
            (
                acc.0 + m.precision * w,
                acc.1 + m.recall * w,
                acc.2 + m.f1 * w,
            )
        })
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12}  {:>9}  {:>9}  {:>9}  {:>8}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for m in &self.classes {
            writeln!(
                f,
                "{:>12}  {:>9.2}  {:>9.2}  {:>9.2}  {:>8}",
                m.class, m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12}  {:>9}  {:>9}  {:>9.2}  {:>8}",
            "accuracy", "", "", self.accuracy, self.n_samples
        )?;
        let (mp, mr, mf) = self.macro_avg();
        writeln!(
            f,
            "{:>12}  {:>9.2}  {:>9.2}  {:>9.2}  {:>8}",
            "macro avg", mp, mr, mf, self.n_samples
        )?;
        let (wp, wr, wf) = self.weighted_avg();
        writeln!(
            f,
            "{:>12}  {:>9.2}  {:>9.2}  {:>9.2}  {:>8}",
            "weighted avg", wp, wr, wf, self.n_samples
        )
    }
}
