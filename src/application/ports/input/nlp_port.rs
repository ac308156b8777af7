/*
NLP port

A port that defines how the application turns raw review text into the normalized form the
vectorizer was fitted on.

Implementations own their linguistic resources (stop words, lemma data) and must be ready
before the first request; the request path never provisions resources itself.

*/
use crate::core::platform::container::review::NormalizedText;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NlpPortError {
    #[error("Invalid resource {name}: {reason}")]
    InvalidResource { name: String, reason: String },
    #[error("Resource download failed: {0}")]
    DownloadFailed(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text normalization applied to every review before vectorization.
pub trait TextPreprocessor: Send + Sync {
    /// Normalizes review text. Pure and deterministic for a given set of resources.
    fn normalize(&self, text: &str) -> NormalizedText;
}
