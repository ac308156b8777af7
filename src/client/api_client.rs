use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("could not connect to {endpoint}: {source}")]
    Connection {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

/// Error details of a non-200 answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    /// The body was a JSON object; holds its `error` field if there was one.
    Json(Option<String>),
    /// The body was not JSON; holds it verbatim.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictReply {
    /// 200 answer with its `sentiment` field, if any.
    Sentiment(Option<String>),
    Rejected { status: u16, detail: ErrorDetail },
}

/// Blocking client for the prediction endpoint. One request per call, no retries.
pub struct SentimentApiClient {
    http: Client,
    endpoint: Url,
}

impl SentimentApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::new(),
            endpoint: Self::predict_endpoint(base_url)?,
        })
    }

    /// `<base>/predict`, keeping any path prefix of the base URL.
    pub fn predict_endpoint(base_url: &str) -> Result<Url, ClientError> {
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join("predict").map_err(|e| invalid(e.to_string()))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn predict(&self, review: &str) -> Result<PredictReply, ClientError> {
        debug!(endpoint = %self.endpoint, chars = review.len(), "sending review");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&json!({ "review": review }))
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ClientError::Connection {
                        endpoint: self.endpoint.to_string(),
                        source: e,
                    }
                } else {
                    ClientError::Transport(e)
                }
            })?;

        let status = response.status();
        let body = response.text()?;
        debug!(status = status.as_u16(), "prediction service answered");

        if status == StatusCode::OK {
            let payload: Value =
                serde_json::from_str(&body).map_err(|e| ClientError::InvalidBody(e.to_string()))?;
            let sentiment = payload
                .get("sentiment")
                .and_then(Value::as_str)
                .map(str::to_string);
            return Ok(PredictReply::Sentiment(sentiment));
        }

        let detail = match serde_json::from_str::<Value>(&body) {
            Ok(Value::Object(fields)) => ErrorDetail::Json(fields.get("error").map(|error| match error {
                Value::String(message) => message.clone(),
                other => other.to_string(),
            })),
            Ok(other) => {
                return Err(ClientError::InvalidBody(format!(
                    "expected a JSON object, got {}",
                    other
                )))
            }
            Err(_) => ErrorDetail::Raw(body),
        };
        Ok(PredictReply::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}
