pub mod linear_classifier;
pub mod tfidf_vectorizer;

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::ports::input::ml_port::{Classifier, MlPortError, Vectorizer};
use crate::application::use_cases::predict_sentiment::LoadedModels;
use crate::config::ModelConfig;

pub use linear_classifier::LinearClassifier;
pub use tfidf_vectorizer::TfidfVectorizer;

/// Loads the vectorizer and classifier named in the model configuration.
pub fn load_models(config: &ModelConfig) -> Result<LoadedModels, MlPortError> {
    let vectorizer = TfidfVectorizer::load(&config.vectorizer_path)?;
    let classifier = LinearClassifier::load(&config.classifier_path)?;

    // mismatches surface per request as vectorization or prediction failures
    if vectorizer.dimension() != classifier.n_features() {
        warn!(
            vectorizer_features = vectorizer.dimension(),
            classifier_features = classifier.n_features(),
            "vectorizer and classifier disagree on feature count"
        );
    }

    info!(
        vectorizer = %config.vectorizer_path,
        classifier = %config.classifier_path,
        features = vectorizer.dimension(),
        classes = ?classifier.classes(),
        probability = classifier.supports_probability(),
        "model and vectorizer loaded"
    );

    Ok(LoadedModels {
        vectorizer: Arc::new(vectorizer),
        classifier: Arc::new(classifier),
    })
}
