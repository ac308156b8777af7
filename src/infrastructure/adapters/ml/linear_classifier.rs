/*
Linear Classifier Adapter

Implements the Classifier port for linear models exported to JSON: logistic regression and
linear support vector classifiers. Both score a feature vector as coef . x + intercept per
class; only logistic regression turns the scores into probabilities, so only it reports a
confidence.

Binary models carry a single coefficient row whose positive side is the second class.
*/
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::application::ports::input::ml_port::{Classifier, MlPortError};
use crate::core::platform::container::prediction::{FeatureVector, Prediction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    LogisticRegression,
    LinearSvc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiClass {
    #[default]
    Multinomial,
    Ovr,
}

/// On-disk representation of a fitted linear classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    pub kind: ClassifierKind,
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default)]
    pub multi_class: MultiClass,
}

#[derive(Debug, Clone)]
pub struct LinearClassifier {
    artifact: LinearArtifact,
    n_features: usize,
}

impl LinearClassifier {
    pub fn new(artifact: LinearArtifact) -> Result<Self, MlPortError> {
        let n_classes = artifact.classes.len();
        if n_classes < 2 {
            return Err(MlPortError::ModelLoadingError(format!(
                "classifier needs at least 2 classes, found {}",
                n_classes
            )));
        }

        let expected_rows = if n_classes == 2 { 1 } else { n_classes };
        if artifact.coef.len() != expected_rows || artifact.intercept.len() != expected_rows {
            return Err(MlPortError::ModelLoadingError(format!(
                "{} classes need {} coefficient rows and intercepts, found {} and {}",
                n_classes,
                expected_rows,
                artifact.coef.len(),
                artifact.intercept.len()
            )));
        }

        let n_features = artifact.coef[0].len();
        if artifact.coef.iter().any(|row| row.len() != n_features) {
            return Err(MlPortError::ModelLoadingError(
                "coefficient rows differ in length".to_string(),
            ));
        }

        Ok(Self {
            artifact,
            n_features,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, MlPortError> {
        let artifact: LinearArtifact = serde_json::from_str(json)
            .map_err(|e| MlPortError::ModelLoadingError(format!("invalid classifier artifact: {}", e)))?;
        Self::new(artifact)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MlPortError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            MlPortError::ModelLoadingError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    fn decision_function(&self, features: &FeatureVector) -> Result<Vec<f64>, MlPortError> {
        if features.dimension() != self.n_features {
            return Err(MlPortError::PredictionFailed(format!(
                "X has {} features, but the classifier is expecting {} features as input",
                features.dimension(),
                self.n_features
            )));
        }
        Ok(self
            .artifact
            .coef
            .iter()
            .zip(&self.artifact.intercept)
            .map(|(row, intercept)| features.dot(row) + intercept)
            .collect())
    }

    fn probabilities(&self, scores: &[f64]) -> Vec<f64> {
        if let [score] = scores {
            let positive = sigmoid(*score);
            return vec![1.0 - positive, positive];
        }
        match self.artifact.multi_class {
            MultiClass::Multinomial => softmax(scores),
            MultiClass::Ovr => {
                let raw: Vec<f64> = scores.iter().map(|s| sigmoid(*s)).collect();
                let total: f64 = raw.iter().sum();
                raw.into_iter().map(|p| p / total).collect()
            }
        }
    }
}

impl Classifier for LinearClassifier {
    fn supports_probability(&self) -> bool {
        self.artifact.kind == ClassifierKind::LogisticRegression
    }

    fn classes(&self) -> &[String] {
        &self.artifact.classes
    }

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, MlPortError> {
        let scores = self.decision_function(features)?;
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(MlPortError::PredictionFailed(
                "decision function produced a non-finite score".to_string(),
            ));
        }

        let winner = match scores.as_slice() {
            [score] => usize::from(*score > 0.0),
            _ => argmax(&scores),
        };
        let label = self.artifact.classes[winner].clone();

        let confidence = if self.supports_probability() {
            self.probabilities(&scores).into_iter().reduce(f64::max)
        } else {
            None
        };

        Ok(Prediction::new(label, confidence))
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Index of the first maximum.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (index, value) in values.iter().enumerate() {
        if *value > values[best] {
            best = index;
        }
    }
    best
}
