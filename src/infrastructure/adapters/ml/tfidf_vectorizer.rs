/*
TF-IDF Vectorizer Adapter

Implements the Vectorizer port on top of a TF-IDF model fitted offline and exported to JSON.
Nothing is learned here: vocabulary and IDF weights are read once and never change.

Term frequencies are raw counts (or 1 + ln(tf) with sublinear_tf), multiplied by the IDF
weight and then normalized per the exported norm.
*/
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::application::ports::input::ml_port::{MlPortError, Vectorizer};
use crate::core::platform::container::prediction::FeatureVector;
use crate::core::platform::container::review::NormalizedText;

const TOKEN_PATTERN: &str = r"\b\w\w+\b";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk representation of a fitted TF-IDF vectorizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfArtifact {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_lowercase() -> bool {
    true
}

pub struct TfidfVectorizer {
    artifact: TfidfArtifact,
    token_pattern: Regex,
    /// Set once at construction; unfitted artifacts load but fail every transform.
    unfitted: Option<String>,
}

impl TfidfVectorizer {
    pub fn new(artifact: TfidfArtifact) -> Result<Self, MlPortError> {
        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(MlPortError::ModelLoadingError(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }
        let token_pattern = Regex::new(TOKEN_PATTERN)
            .map_err(|e| MlPortError::ModelLoadingError(format!("token pattern: {}", e)))?;
        let unfitted = Self::fit_problem(&artifact);
        Ok(Self {
            artifact,
            token_pattern,
            unfitted,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, MlPortError> {
        let artifact: TfidfArtifact = serde_json::from_str(json)
            .map_err(|e| MlPortError::ModelLoadingError(format!("invalid vectorizer artifact: {}", e)))?;
        Self::new(artifact)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MlPortError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            MlPortError::ModelLoadingError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.artifact.vocabulary.len()
    }

    /// Why the artifact cannot vectorize anything, if it cannot.
    fn fit_problem(artifact: &TfidfArtifact) -> Option<String> {
        let size = artifact.vocabulary.len();
        if size == 0 {
            return Some("The TF-IDF vectorizer is not fitted: vocabulary is empty".to_string());
        }
        if artifact.idf.len() != size {
            return Some(format!(
                "idf has {} entries but vocabulary has {} terms",
                artifact.idf.len(),
                size
            ));
        }
        artifact
            .vocabulary
            .iter()
            .find(|(_, index)| **index >= size)
            .map(|(term, index)| {
                format!(
                    "term '{}' maps to index {} outside vocabulary of {} terms",
                    term, index, size
                )
            })
    }

    fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.artifact.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let words: Vec<&str> = self
            .token_pattern
            .find_iter(&text)
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.artifact.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(words.len()) {
            for window in words.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

impl Vectorizer for TfidfVectorizer {
    fn dimension(&self) -> usize {
        self.vocabulary_size()
    }

    fn transform(&self, text: &NormalizedText) -> Result<FeatureVector, MlPortError> {
        if let Some(reason) = &self.unfitted {
            return Err(MlPortError::VectorizationFailed(reason.clone()));
        }

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.analyze(text.as_str()) {
            if let Some(&index) = self.artifact.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut weights: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, tf)| {
                let tf = if self.artifact.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (index, tf * self.artifact.idf[index])
            })
            .collect();

        let norm = match self.artifact.norm {
            Some(Norm::L2) => weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Some(Norm::L1) => weights.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            None => 1.0,
        };
        if norm > 0.0 {
            for (_, w) in weights.iter_mut() {
                *w /= norm;
            }
        }

        Ok(FeatureVector::from_pairs(self.dimension(), weights))
    }
}
