use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::application::ports::input::ml_port::{Classifier, MlPortError, Vectorizer};
use crate::application::ports::input::nlp_port::TextPreprocessor;
use crate::core::platform::container::prediction::Prediction;
use crate::core::platform::container::review::ReviewText;

/// Failure of one stage of the normalize -> vectorize -> classify pipeline.
#[derive(Debug, Clone, Error)]
pub enum PredictionError {
    #[error("Model or vectorizer not loaded.")]
    NotReady,
    #[error("Text vectorization failed: {0}")]
    Vectorization(MlPortError),
    #[error("Model prediction failed: {0}")]
    Prediction(MlPortError),
}

/// The fitted artifacts, present only when both loaded.
#[derive(Clone)]
pub struct LoadedModels {
    pub vectorizer: Arc<dyn Vectorizer>,
    pub classifier: Arc<dyn Classifier>,
}

#[derive(Clone)]
pub struct PredictSentimentUseCase {
    preprocessor: Arc<dyn TextPreprocessor>,
    models: Option<LoadedModels>,
}

impl PredictSentimentUseCase {
    pub fn new(preprocessor: Arc<dyn TextPreprocessor>, models: Option<LoadedModels>) -> Self {
        Self {
            preprocessor,
            models,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.models.is_some()
    }

    pub fn supports_probability(&self) -> bool {
        self.models
            .as_ref()
            .map(|models| models.classifier.supports_probability())
            .unwrap_or(false)
    }

    pub fn execute(&self, review: &ReviewText) -> Result<Prediction, PredictionError> {
        let models = self.models.as_ref().ok_or(PredictionError::NotReady)?;

        let normalized = self.preprocessor.normalize(review.as_str());
        debug!(normalized = %normalized, "review normalized");

        let features = models
            .vectorizer
            .transform(&normalized)
            .map_err(PredictionError::Vectorization)?;
        debug!(nnz = features.nnz(), dimension = features.dimension(), "review vectorized");

        models
            .classifier
            .predict(&features)
            .map_err(PredictionError::Prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::container::prediction::FeatureVector;
    use crate::core::platform::container::review::NormalizedText;

    struct MockPreprocessor;

    impl TextPreprocessor for MockPreprocessor {
        fn normalize(&self, text: &str) -> NormalizedText {
            NormalizedText::from_tokens(text.split_whitespace().map(str::to_lowercase))
        }
    }

    struct MockVectorizer {
        fail: bool,
    }

    impl Vectorizer for MockVectorizer {
        fn dimension(&self) -> usize {
            1
        }

        fn transform(&self, text: &NormalizedText) -> Result<FeatureVector, MlPortError> {
            if self.fail {
                return Err(MlPortError::VectorizationFailed("vocabulary is empty".to_string()));
            }
            let hits = text.tokens().filter(|t| *t == "good").count() as f64;
            Ok(FeatureVector::from_pairs(1, vec![(0, hits)]))
        }
    }

    struct MockClassifier {
        classes: Vec<String>,
        fail: bool,
    }

    impl Classifier for MockClassifier {
        fn supports_probability(&self) -> bool {
            false
        }

        fn classes(&self) -> &[String] {
            &self.classes
        }

        fn predict(&self, features: &FeatureVector) -> Result<Prediction, MlPortError> {
            if self.fail {
                return Err(MlPortError::PredictionFailed("dimension mismatch".to_string()));
            }
            let label = if features.dot(&[1.0]) > 0.0 { "positive" } else { "negative" };
            Ok(Prediction::new(label, None))
        }
    }

    fn use_case(vectorizer_fails: bool, classifier_fails: bool) -> PredictSentimentUseCase {
        PredictSentimentUseCase::new(
            Arc::new(MockPreprocessor),
            Some(LoadedModels {
                vectorizer: Arc::new(MockVectorizer { fail: vectorizer_fails }),
                classifier: Arc::new(MockClassifier {
                    classes: vec!["negative".to_string(), "positive".to_string()],
                    fail: classifier_fails,
                }),
            }),
        )
    }

    #[test]
    fn test_execute_runs_full_pipeline() {
        let use_case = use_case(false, false);
        assert!(use_case.is_ready());

        let prediction = use_case.execute(&ReviewText::new("Good GOOD stuff").unwrap()).unwrap();
        assert_eq!(prediction.label, "positive");

        let prediction = use_case.execute(&ReviewText::new("meh").unwrap()).unwrap();
        assert_eq!(prediction.label, "negative");
    }

    #[test]
    fn test_execute_without_models_is_not_ready() {
        let use_case = PredictSentimentUseCase::new(Arc::new(MockPreprocessor), None);
        assert!(!use_case.is_ready());
        assert!(!use_case.supports_probability());

        let result = use_case.execute(&ReviewText::new("good").unwrap());
        assert!(matches!(result, Err(PredictionError::NotReady)));
    }

    #[test]
    fn test_vectorization_failure_is_reported_per_stage() {
        let result = use_case(true, false).execute(&ReviewText::new("good").unwrap());
        let err = result.unwrap_err();
        assert!(matches!(err, PredictionError::Vectorization(_)));
        assert_eq!(err.to_string(), "Text vectorization failed: vocabulary is empty");
    }

    #[test]
    fn test_prediction_failure_is_reported_per_stage() {
        let result = use_case(false, true).execute(&ReviewText::new("good").unwrap());
        let err = result.unwrap_err();
        assert!(matches!(err, PredictionError::Prediction(_)));
        assert_eq!(err.to_string(), "Model prediction failed: dimension mismatch");
    }
}
