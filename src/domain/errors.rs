use std::path::PathBuf;
use thiserror::Error;

/// Failure to materialize the model artifact. Fatal: the host halts.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Model file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("Failed to read model file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model file {path:?} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported model format v{found} (this build reads v{expected})")]
    IncompatibleFormat { found: u32, expected: u32 },

    #[error("Model is incompatible with its declared schema: {reason}")]
    IncompatibleModel { reason: String },
}

impl LoadError {
    /// Blocking message shown to the user before the host stops.
    pub fn user_message(&self) -> String {
        match self {
            LoadError::NotFound { path } => format!(
                "Please ensure the model file '{}' is in the same directory as this program",
                path.display()
            ),
            other => format!("Unable to load the price model: {}", other),
        }
    }
}

/// The row handed to the model does not match the schema it was trained on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaMismatch {
    #[error("missing column '{column}'")]
    MissingColumn { column: String },

    #[error("unexpected column '{column}'")]
    UnexpectedColumn { column: String },

    #[error("column '{column}' expects {expected} values, got {found}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("column '{column}' has no level '{value}'")]
    UnknownCategory { column: String, value: String },
}

/// Recoverable inference failure. The caller reports it and allows a retry.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredictionError {
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(#[from] SchemaMismatch),

    #[error("Inference failed: {reason}")]
    Inference { reason: String },

    #[error("Model returned no prediction")]
    EmptyOutput,

    #[error("Model returned {count} values for a single row")]
    MultipleOutputs { count: usize },

    #[error("Model returned an invalid price: {value}")]
    InvalidOutput { value: f64 },
}

/// Pre-inference gate result. Blocks the model call; not an error.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationWarning {
    #[error("Mileage must be greater than 0 (got {mileage})")]
    NonPositiveMileage { mileage: u32 },

    #[error("Year must be {min} or later (got {year})")]
    YearBeforeMinimum { year: u16, min: u16 },
}
