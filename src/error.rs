// src/error.rs
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::use_cases::predict_sentiment::PredictionError;
use crate::core::platform::container::review::ReviewError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Error parsing JSON: {0}")]
    MalformedJson(String),

    #[error("No JSON data received.")]
    NoJsonData,

    #[error("Request body exceeds {0} bytes.")]
    PayloadTooLarge(usize),

    #[error("Error reading request body: {0}")]
    UnreadableBody(String),

    #[error(transparent)]
    InvalidReview(#[from] ReviewError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::MalformedJson(_)
            | ApiError::NoJsonData
            | ApiError::UnreadableBody(_)
            | ApiError::InvalidReview(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
