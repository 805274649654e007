//! canopy-classifiers: tabular classification helpers for the canopy trainer.
//!
//! This crate provides CSV dataset intake (last column is the label by
//! convention), a thin classifier wrapper over the `gbdt` crate, artifact
//! persistence with a versioned envelope, and classification metrics.
//!
//! The design favors small, testable modules; the hard numerical work
//! (tree induction, prediction) is delegated entirely to the backend crate.
pub mod config;
pub mod data_handling;
pub mod io;
pub mod metrics;
pub mod models;

pub use config::ForestConfig;
pub use data_handling::Dataset;
pub use models::gbdt::{ForestClassifier, MODEL_FILE_NAME};
