pub mod inference_adapter;
pub mod model_loader;
pub mod predictor;

pub use inference_adapter::{Estimate, InferenceAdapter};
pub use model_loader::{ARTIFACT_FORMAT_VERSION, ForestModel, ModelArtifact, ModelLoader};
pub use predictor::PricePredictor;
