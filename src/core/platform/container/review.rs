/*
Review Domain Entities

ReviewText is the raw text a user submits for sentiment analysis. It is only constructed
through validation, so a ReviewText in hand is always a non-blank string.

NormalizedText is the cleaned form of a review that the vectorizer consumes. It is produced
by a TextPreprocessor and never mutated afterwards.
*/
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("The \"review\" field is missing, empty, or not a string.")]
    InvalidReview,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewText(String);

impl ReviewText {
    /// Validates a raw string. Whitespace-only input is rejected.
    pub fn new(text: impl Into<String>) -> Result<Self, ReviewError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ReviewError::InvalidReview);
        }
        Ok(Self(text))
    }

    /// Extracts the `review` field from a decoded request body.
    ///
    /// Anything but an object carrying a non-blank string under `review` is rejected.
    pub fn from_json(body: &Value) -> Result<Self, ReviewError> {
        match body.get("review") {
            Some(Value::String(text)) => Self::new(text.as_str()),
            _ => Err(ReviewError::InvalidReview),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReviewText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        for token in tokens {
            if !joined.is_empty() {
                joined.push(' ');
            }
            joined.push_str(token.as_ref());
        }
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|t| !t.is_empty())
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
