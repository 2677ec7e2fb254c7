use super::predictor::PricePredictor;
use crate::domain::errors::{LoadError, PredictionError};
use crate::domain::schema::FeatureSchema;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, ErrorKind};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::{error, info};

/// Artifact layout version this build reads and writes.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

pub type ForestModel = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// A trained price model together with the schema it was fitted on.
///
/// Immutable once loaded; share it behind an `Arc`.
#[derive(Serialize, Deserialize)]
pub struct ModelArtifact {
    format_version: u32,
    name: String,
    version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trained_at: Option<DateTime<Utc>>,
    schema: FeatureSchema,
    /// Width of the matrix the forest was fitted on.
    n_features: usize,
    model: ForestModel,
}

#[derive(Deserialize)]
struct ArtifactHeader {
    format_version: u32,
}

impl ModelArtifact {
    /// `n_features` is the column count of the training matrix.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        schema: FeatureSchema,
        n_features: usize,
        model: ForestModel,
    ) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            name: name.into(),
            version: version.into(),
            trained_at: Some(Utc::now()),
            schema,
            n_features,
            model,
        }
    }

    pub fn trained_at(&self) -> Option<DateTime<Utc>> {
        self.trained_at
    }

    /// Writes the artifact as JSON, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
        serde_json::to_writer(BufWriter::new(file), self)
            .with_context(|| format!("Failed to serialize model to {:?}", path))?;
        Ok(())
    }

    /// Checks the recorded training width against the schema, then runs
    /// one inference on an all-zero row. A forest fitted on more features
    /// than recorded panics on out-of-range column access, so the inference
    /// runs under `catch_unwind`.
    fn check_shape(&self) -> Result<(), LoadError> {
        if self.n_features != self.schema.width() {
            return Err(LoadError::IncompatibleModel {
                reason: format!(
                    "model was fitted on {} features but the schema encodes {}",
                    self.n_features,
                    self.schema.width()
                ),
            });
        }

        let zeros = vec![0.0; self.schema.width()];
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.predict_row(&zeros)));

        let reason = match outcome {
            Ok(Ok(values)) if values.len() == 1 => return Ok(()),
            Ok(Ok(values)) => format!(
                "trial inference returned {} values for one row",
                values.len()
            ),
            Ok(Err(e)) => e.to_string(),
            Err(_) => format!(
                "trial inference on {} features aborted",
                self.schema.width()
            ),
        };
        Err(LoadError::IncompatibleModel { reason })
    }
}

impl fmt::Debug for ModelArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelArtifact")
            .field("format_version", &self.format_version)
            .field("name", &self.name)
            .field("version", &self.version)
            .field("trained_at", &self.trained_at)
            .field("columns", &self.schema.columns.len())
            .field("n_features", &self.n_features)
            .finish_non_exhaustive()
    }
}

impl PricePredictor for ModelArtifact {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict_row(&self, design: &[f64]) -> Result<Vec<f64>, PredictionError> {
        let input_matrix = DenseMatrix::from_2d_vec(&vec![design.to_vec()]).map_err(|e| {
            PredictionError::Inference {
                reason: format!("Matrix creation failed: {}", e),
            }
        })?;

        self.model
            .predict(&input_matrix)
            .map_err(|e| PredictionError::Inference {
                reason: format!("Prediction failed: {}", e),
            })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }
}

/// Loads a [`ModelArtifact`] once at startup.
pub struct ModelLoader;

impl ModelLoader {
    pub fn load(path: impl AsRef<Path>) -> Result<ModelArtifact, LoadError> {
        let path = path.as_ref();
        let result = Self::read_artifact(path);
        match &result {
            Ok(artifact) => info!(
                "Successfully loaded price model '{}' {} from {:?}",
                artifact.name, artifact.version, path
            ),
            Err(e) => error!("Failed to load price model: {}", e),
        }
        result
    }

    fn read_artifact(path: &Path) -> Result<ModelArtifact, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                LoadError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let corrupt = |source| LoadError::Corrupt {
            path: path.to_path_buf(),
            source,
        };

        let header: ArtifactHeader = serde_json::from_slice(&bytes).map_err(corrupt)?;
        if header.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(LoadError::IncompatibleFormat {
                found: header.format_version,
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }

        let artifact: ModelArtifact = serde_json::from_slice(&bytes).map_err(corrupt)?;
        if artifact.schema.is_empty() {
            return Err(LoadError::IncompatibleModel {
                reason: "schema declares no columns".to_string(),
            });
        }
        artifact.check_shape()?;
        Ok(artifact)
    }
}
