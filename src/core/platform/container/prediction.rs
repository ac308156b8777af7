/*
Prediction Domain Entities

FeatureVector is the sparse numeric representation of a normalized review, as produced by a
fitted vectorizer. Its dimension is the vectorizer's vocabulary size.

Prediction is the classifier's verdict: an open-ended label plus an optional confidence,
present only when the classifier can estimate class probabilities.
*/
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    dimension: usize,
    /// (feature index, weight) pairs sorted by index, zero weights omitted
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Builds a vector from arbitrary pairs. Duplicate indices are summed.
    pub fn from_pairs(dimension: usize, pairs: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut entries: Vec<(usize, f64)> = pairs.into_iter().collect();
        entries.sort_by_key(|(index, _)| *index);

        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (index, weight) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == index => *acc += weight,
                _ => merged.push((index, weight)),
            }
        }
        merged.retain(|(_, weight)| *weight != 0.0);

        Self {
            dimension,
            entries: merged,
        }
    }

    pub fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Dot product against a dense weight row.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(index, value)| weights.get(*index).map(|w| w * value))
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: Option<f64>,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: Option<f64>) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// The label with every word capitalized, e.g. `"very negative"` -> `"Very Negative"`.
    pub fn display_label(&self) -> String {
        title_case(&self.label)
    }

    /// Confidence rounded to three decimals.
    pub fn rounded_confidence(&self) -> Option<f64> {
        self.confidence.map(round_to_millis)
    }
}

/// Uppercases the first letter of every run of letters and lowercases the rest.
pub fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut previous_is_letter = false;
    for ch in label.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }
    out
}

fn round_to_millis(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
