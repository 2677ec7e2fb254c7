//! Desktop window settings.

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct UiEnvConfig {
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for UiEnvConfig {
    fn default() -> Self {
        Self {
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl UiEnvConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            window_width: parse_dimension(lookup, "UI_WINDOW_WIDTH", defaults.window_width)?,
            window_height: parse_dimension(lookup, "UI_WINDOW_HEIGHT", defaults.window_height)?,
        })
    }
}

fn parse_dimension<F>(lookup: &F, key: &str, default: f32) -> Result<f32>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => {
            let value = raw
                .trim()
                .parse::<f32>()
                .with_context(|| format!("Failed to parse {}='{}'", key, raw))?;
            anyhow::ensure!(value > 0.0, "{} must be positive, got {}", key, value);
            Ok(value)
        }
        None => Ok(default),
    }
}
