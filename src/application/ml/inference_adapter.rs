use super::predictor::PricePredictor;
use crate::domain::car::CarFeatureRecord;
use crate::domain::errors::{PredictionError, ValidationWarning};
use crate::domain::pricing::PredictionResult;
use crate::domain::validation::InputGate;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of a gated prediction request.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    Price(PredictionResult),
    /// The gate rejected the record; the model was not called.
    Rejected(Vec<ValidationWarning>),
}

/// Turns car records into model rows and model output into prices.
///
/// Holds a read-only handle to the loaded model, so it can be cloned
/// freely across hosts and threads.
pub struct InferenceAdapter<P: PricePredictor> {
    predictor: Arc<P>,
}

impl<P: PricePredictor> Clone for InferenceAdapter<P> {
    fn clone(&self) -> Self {
        Self {
            predictor: Arc::clone(&self.predictor),
        }
    }
}

impl<P: PricePredictor> InferenceAdapter<P> {
    pub fn new(predictor: Arc<P>) -> Self {
        Self { predictor }
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Runs the gate, then the model if the record passes.
    pub fn estimate(&self, record: &CarFeatureRecord) -> Result<Estimate, PredictionError> {
        let warnings = InputGate::check(record);
        if !warnings.is_empty() {
            for warning in &warnings {
                warn!("Validation FAILED: {}", warning);
            }
            return Ok(Estimate::Rejected(warnings));
        }
        self.predict(record).map(Estimate::Price)
    }

    /// Predicts the price of one car. Does not apply the input gate.
    pub fn predict(&self, record: &CarFeatureRecord) -> Result<PredictionResult, PredictionError> {
        let row = record.to_row();
        let design = self.predictor.schema().encode(&row)?;
        debug!(
            "Running {} {} on {} encoded features",
            self.predictor.name(),
            self.predictor.version(),
            design.len()
        );

        let outputs = self.predictor.predict_row(&design)?;
        let value = match outputs.as_slice() {
            [] => return Err(PredictionError::EmptyOutput),
            [value] => *value,
            many => {
                return Err(PredictionError::MultipleOutputs { count: many.len() });
            }
        };

        let result = PredictionResult::from_f64(value).ok_or_else(|| {
            warn!("Model produced an unusable price: {}", value);
            PredictionError::InvalidOutput { value }
        })?;
        debug!("Predicted price {}", result);
        Ok(result)
    }
}
