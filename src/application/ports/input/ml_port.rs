/*

ML Port

A port that defines how the application interacts with the fitted ML artifacts: a vectorizer
that maps normalized text to a feature vector, and a classifier that maps that vector to a
sentiment label.

Both artifacts are fitted offline and loaded once at startup. Implementations must be safe
to share across request threads without locking, which in practice means they are never
mutated after load.

*/
use crate::core::platform::container::prediction::{FeatureVector, Prediction};
use crate::core::platform::container::review::NormalizedText;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum MlPortError {
    #[error("Model loading error: {0}")]
    ModelLoadingError(String),
    #[error("{0}")]
    VectorizationFailed(String),
    #[error("{0}")]
    PredictionFailed(String),
}

/// A fitted text vectorizer.
pub trait Vectorizer: Send + Sync {
    /// Number of features in every vector this vectorizer produces.
    fn dimension(&self) -> usize;

    fn transform(&self, text: &NormalizedText) -> Result<FeatureVector, MlPortError>;
}

/// A fitted classifier.
pub trait Classifier: Send + Sync {
    /// Whether `predict` fills in a confidence. Fixed for the lifetime of the classifier.
    fn supports_probability(&self) -> bool;

    /// Labels the classifier can emit, in model order.
    fn classes(&self) -> &[String];

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, MlPortError>;
}
