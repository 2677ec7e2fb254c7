//! Model artifact location.

use anyhow::Result;
use std::path::PathBuf;

/// Artifact looked up relative to the working directory when `MODEL_PATH` is unset.
pub const DEFAULT_MODEL_PATH: &str = "random_forest_model.json";

#[derive(Debug, Clone)]
pub struct ModelEnvConfig {
    pub model_path: PathBuf,
}

impl ModelEnvConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model_path = lookup("MODEL_PATH")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());

        Ok(Self {
            model_path: PathBuf::from(model_path),
        })
    }
}
