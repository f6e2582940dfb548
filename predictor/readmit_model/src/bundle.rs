//! On-disk bundle format for trained artifacts.
//!
//! A bundle is one JSON document carrying the feature schema and the
//! fitted model together, so the two cannot drift apart in deployment.
//! `schema_version` names the document layout itself and is checked
//! before anything else in the file is trusted.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use readmit_schema::FeatureSchema;
use serde::Deserialize;
use thiserror::Error;

use crate::scorer::LogisticModel;

/// Bundle document layout this build understands.
pub const BUNDLE_SCHEMA_VERSION: u32 = 1;

/// Bundle file name used when neither the command line nor the
/// environment names one.
pub const DEFAULT_BUNDLE_FILE: &str = "readmission_model_bundle.json";

/// Failures while loading a bundle from disk.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("cannot read model bundle {path:?}: {source}")]
    ArtifactMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model bundle {path:?} is unusable: {reason}")]
    ArtifactCorrupt { path: PathBuf, reason: String },
}

fn corrupt(path: &Path, reason: String) -> BundleError {
    BundleError::ArtifactCorrupt {
        path: path.to_path_buf(),
        reason,
    }
}

/// Serde mirror of the bundle document.
#[derive(Debug, Deserialize)]
struct RawBundle {
    schema_version: u32,
    model_name: String,
    feature_names: Vec<String>,
    model: RawModel,
}

#[derive(Debug, Deserialize)]
struct RawModel {
    weights: Vec<f64>,
    intercept: f64,
}

/// A validated bundle: named model, feature schema, and a logistic
/// model already known to be exactly as wide as that schema.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    model_name: String,
    schema: FeatureSchema,
    model: LogisticModel,
}

impl ModelBundle {
    /// Load and validate the bundle at `path`.
    ///
    /// Validation order: the file must parse as the expected JSON
    /// layout, `schema_version` must match this build, the feature
    /// names must form a valid schema, and the weight vector must be
    /// exactly as wide as that schema. A bundle failing any check is
    /// rejected whole; there is no partial load.
    pub fn load(path: impl AsRef<Path>) -> Result<ModelBundle, BundleError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| BundleError::ArtifactMissing {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawBundle =
            serde_json::from_str(&text).map_err(|e| corrupt(path, format!("invalid JSON: {e}")))?;

        if raw.schema_version != BUNDLE_SCHEMA_VERSION {
            return Err(corrupt(
                path,
                format!(
                    "unsupported schema_version {} (this build reads {})",
                    raw.schema_version, BUNDLE_SCHEMA_VERSION
                ),
            ));
        }
        let schema = FeatureSchema::new(raw.feature_names)
            .map_err(|e| corrupt(path, format!("feature_names: {e}")))?;
        if raw.model.weights.len() != schema.len() {
            return Err(corrupt(
                path,
                format!(
                    "model carries {} weights for {} schema columns",
                    raw.model.weights.len(),
                    schema.len()
                ),
            ));
        }

        debug!(
            "loaded model '{}' with {} features from {:?}",
            raw.model_name,
            schema.len(),
            path
        );
        Ok(ModelBundle {
            model_name: raw.model_name,
            schema,
            model: LogisticModel::new(raw.model.weights, raw.model.intercept),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn model(&self) -> &LogisticModel {
        &self.model
    }

    /// Split the bundle into the pieces a predictor owns.
    pub fn into_parts(self) -> (String, FeatureSchema, LogisticModel) {
        (self.model_name, self.schema, self.model)
    }
}
