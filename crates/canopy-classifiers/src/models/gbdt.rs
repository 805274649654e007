//! Gradient-boosted decision tree classifier backed by the `gbdt` crate,
//! plus artifact save/load with a versioned serde_json envelope.
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::config::ForestConfig;
use crate::models::classifier_trait::ClassifierModel;

/// Fixed artifact filename inside the model directory. Inference containers
/// locate the model by this name, so it is part of the on-disk contract.
pub const MODEL_FILE_NAME: &str = "model.joblib";

/// On-disk format version of the artifact envelope.
const FORMAT_VERSION: u32 = 1;

/// Versioned envelope for the serialized model. Generic over the model field
/// so saving can borrow the backend model while loading owns it.
#[derive(Serialize, Deserialize)]
struct ModelEnvelope<M> {
    format_version: u32,
    n_features: usize,
    /// The two class labels, (lower, upper) in sorted order.
    classes: (i32, i32),
    config: ForestConfig,
    model: M,
}

/// Binary classifier over an ensemble of decision trees.
///
/// Tree induction and prediction are delegated entirely to the backend
/// crate; this wrapper maps class labels to the backend's -1/+1 convention
/// and back.
pub struct ForestClassifier {
    config: ForestConfig,
    model: Option<GBDT>,
    classes: Option<(i32, i32)>,
    n_features: usize,
}

impl ForestClassifier {
    pub fn new(config: ForestConfig) -> Self {
        ForestClassifier {
            config,
            model: None,
            classes: None,
            n_features: 0,
        }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// The two class labels in sorted order, once fitted.
    pub fn classes(&self) -> Option<(i32, i32)> {
        self.classes
    }

    /// Serialize the fitted model to `<model_dir>/model.joblib`, silently
    /// overwriting an existing file. Returns the artifact path.
    pub fn save<P: AsRef<Path>>(&self, model_dir: P) -> Result<PathBuf> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| anyhow!("Cannot save: model has not been fitted"))?;
        let classes = self
            .classes
            .ok_or_else(|| anyhow!("Cannot save: model has not been fitted"))?;

        let path = model_dir.as_ref().join(MODEL_FILE_NAME);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create model file: {}", path.display()))?;

        let envelope = ModelEnvelope {
            format_version: FORMAT_VERSION,
            n_features: self.n_features,
            classes,
            config: self.config.clone(),
            model,
        };
        serde_json::to_writer(BufWriter::new(file), &envelope)
            .with_context(|| format!("Failed to serialize model to {}", path.display()))?;

        log::info!("model saved to {}", path.display());
        Ok(path)
    }

    /// Deserialize a fitted model from `<model_dir>/model.joblib`.
    ///
    /// This is the companion loader used by inference callers: it returns a
    /// ready-to-predict classifier.
    pub fn load<P: AsRef<Path>>(model_dir: P) -> Result<Self> {
        let path = model_dir.as_ref().join(MODEL_FILE_NAME);
        let file = File::open(&path)
            .with_context(|| format!("Failed to open model file: {}", path.display()))?;

        let envelope: ModelEnvelope<GBDT> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to deserialize model from {}", path.display()))?;

        if envelope.format_version != FORMAT_VERSION {
            return Err(anyhow!(
                "Incompatible model format version {} (expected {}) in {}",
                envelope.format_version,
                FORMAT_VERSION,
                path.display()
            ));
        }

        Ok(ForestClassifier {
            config: envelope.config,
            model: Some(envelope.model),
            classes: Some(envelope.classes),
            n_features: envelope.n_features,
        })
    }

    fn fitted(&self) -> Result<(&GBDT, (i32, i32))> {
        match (&self.model, self.classes) {
            (Some(model), Some(classes)) => Ok((model, classes)),
            _ => Err(anyhow!("Model has not been fitted")),
        }
    }
}

impl ClassifierModel for ForestClassifier {
    fn fit(&mut self, x: &Array2<f32>, y: &[i32]) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(anyhow!(
                "Feature matrix has {} rows but {} labels were given",
                x.nrows(),
                y.len()
            ));
        }

        let distinct: BTreeSet<i32> = y.iter().copied().collect();
        if distinct.len() != 2 {
            return Err(anyhow!(
                "The LogLikelyhood loss requires exactly two classes, found {}",
                distinct.len()
            ));
        }
        let mut labels = distinct.into_iter();
        let (lower, upper) = match (labels.next(), labels.next()) {
            (Some(lower), Some(upper)) => (lower, upper),
            _ => unreachable!("two distinct labels checked above"),
        };

        let mut config = Config::new();
        config.set_feature_size(x.ncols());
        config.set_max_depth(self.config.max_depth);
        config.set_iterations(self.config.n_estimators);
        config.set_shrinkage(self.config.learning_rate);
        config.set_loss("LogLikelyhood");
        // Full sampling keeps training deterministic; the backend only
        // draws randomness when these ratios are below 1.0.
        config.set_data_sample_ratio(1.0);
        config.set_feature_sample_ratio(1.0);
        config.set_training_optimization_level(2);
        config.set_debug(false);

        let mut model = GBDT::new(&config);

        let mut train_dv = DataVec::with_capacity(x.nrows());
        for (row, &label) in x.rows().into_iter().zip(y.iter()) {
            let target = if label == upper { 1.0 } else { -1.0 };
            train_dv.push(Data::new_training_data(row.to_vec(), 1.0, target, None));
        }

        model.fit(&mut train_dv);

        self.model = Some(model);
        self.classes = Some((lower, upper));
        self.n_features = x.ncols();
        Ok(())
    }

    fn predict(&self, x: &Array2<f32>) -> Result<Vec<i32>> {
        let (_, (lower, upper)) = self.fitted()?;
        let probabilities = self.predict_proba(x)?;
        Ok(probabilities
            .into_iter()
            .map(|p| if p >= 0.5 { upper } else { lower })
            .collect())
    }

    fn predict_proba(&self, x: &Array2<f32>) -> Result<Vec<f32>> {
        let (model, _) = self.fitted()?;

        let mut test_dv = DataVec::with_capacity(x.nrows());
        for row in x.rows() {
            test_dv.push(Data::new_test_data(row.to_vec(), None));
        }

        Ok(model.predict(&test_dv))
    }

    fn name(&self) -> &str {
        "gbdt-forest"
    }
}
