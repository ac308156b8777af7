// src/delivery/router.rs
use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

use crate::core::platform::container::review::ReviewText;
use crate::delivery::api_server::AppState;
use crate::error::ApiError;

pub const HEALTH_MESSAGE: &str = "Sentiment Analysis API is running.";

/// Largest predict body read into memory, far above any real review.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub sentiment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        message: HEALTH_MESSAGE.to_string(),
    })
}

async fn predict(state: web::Data<AppState>, payload: web::Payload) -> Result<HttpResponse, ApiError> {
    let request_id = Uuid::new_v4();
    let body = match payload.to_bytes_limited(MAX_BODY_BYTES).await {
        Ok(read) => read.map_err(|e| ApiError::UnreadableBody(e.to_string())),
        Err(_) => Err(ApiError::PayloadTooLarge(MAX_BODY_BYTES)),
    }
    .map_err(|e| {
        warn!(%request_id, error = %e, "rejected predict request");
        e
    })?;

    let span = info_span!("predict", %request_id, bytes = body.len());

    span.in_scope(|| {
        let result = predict_body(&state, &body);
        match &result {
            Ok(response) => info!(
                sentiment = %response.sentiment,
                confidence = ?response.confidence,
                "prediction served"
            ),
            Err(e @ ApiError::Prediction(_)) => error!(error = %e, "prediction failed"),
            Err(e) => warn!(error = %e, "rejected predict request"),
        }
        result.map(|response| HttpResponse::Ok().json(response))
    })
}

/// Validation runs in a fixed order: JSON syntax, then the review field, then readiness.
fn predict_body(state: &AppState, body: &[u8]) -> Result<PredictResponse, ApiError> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::MalformedJson(e.to_string()))?;
    if payload.is_null() {
        return Err(ApiError::NoJsonData);
    }

    let review = ReviewText::from_json(&payload)?;
    let prediction = state.predictor.execute(&review)?;

    Ok(PredictResponse {
        sentiment: prediction.display_label(),
        confidence: prediction.rounded_confidence(),
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(health)))
        .service(web::resource("/predict").route(web::post().to(predict)));
}
