//! Configuration module for the car price predictor.
//!
//! Values come from environment variables (optionally via a `.env` file),
//! organized by concern: Model and UI.

mod model_config;
mod ui_config;

pub use model_config::{DEFAULT_MODEL_PATH, ModelEnvConfig};
pub use ui_config::UiEnvConfig;

use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub model_path: PathBuf,
    pub window_width: f32,
    pub window_height: f32,
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model = ModelEnvConfig::from_lookup(&lookup)?;
        let ui = UiEnvConfig::from_lookup(&lookup)?;

        Ok(Self {
            model_path: model.model_path,
            window_width: ui.window_width,
            window_height: ui.window_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(config.window_width, 1200.0);
        assert_eq!(config.window_height, 800.0);
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("MODEL_PATH", "models/v2.json"),
            ("UI_WINDOW_WIDTH", "900"),
        ]))
        .unwrap();
        assert_eq!(config.model_path, PathBuf::from("models/v2.json"));
        assert_eq!(config.window_width, 900.0);
        assert_eq!(config.window_height, 800.0);
    }

    #[test]
    fn test_invalid_window_size_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("UI_WINDOW_HEIGHT", "tall")])).unwrap_err();
        assert!(err.to_string().contains("UI_WINDOW_HEIGHT"));
    }
}
