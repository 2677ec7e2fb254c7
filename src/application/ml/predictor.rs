use crate::domain::errors::PredictionError;
use crate::domain::schema::FeatureSchema;

/// Interface for price regression models
pub trait PricePredictor: Send + Sync {
    /// Input schema the model was trained on
    fn schema(&self) -> &FeatureSchema;

    /// Run inference on one encoded design row.
    /// Returns the raw model output; callers enforce the single-value contract.
    fn predict_row(&self, design: &[f64]) -> Result<Vec<f64>, PredictionError>;

    /// Get model name/type
    fn name(&self) -> &str;

    /// Get model version/id
    fn version(&self) -> &str;
}
