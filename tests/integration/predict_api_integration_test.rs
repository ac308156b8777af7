/*
Predict API Integration Tests

Drive the HTTP contract end to end against the demo artifacts shipped in models/: real
lexicon, real TF-IDF vectorizer, real logistic regression model.
*/
use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use tempfile::tempdir;

use sentiment_service::config::{LexiconConfig, ModelConfig, Settings};
use sentiment_service::delivery::router::{configure, HealthResponse, PredictResponse, MAX_BODY_BYTES};
use sentiment_service::delivery::AppState;
use sentiment_service::error::ErrorBody;
use sentiment_service::setup::build_app_state;

fn settings(data_dir: &std::path::Path, with_models: bool) -> Settings {
    let models = format!("{}/models", env!("CARGO_MANIFEST_DIR"));
    let model = if with_models {
        ModelConfig {
            vectorizer_path: format!("{}/tfidf_vectorizer.json", models),
            classifier_path: format!("{}/lr_model.json", models),
        }
    } else {
        ModelConfig {
            vectorizer_path: data_dir.join("missing_vectorizer.json").to_string_lossy().into_owned(),
            classifier_path: data_dir.join("missing_model.json").to_string_lossy().into_owned(),
        }
    };

    Settings {
        model,
        lexicon: LexiconConfig {
            data_dir: data_dir.join("nlp_data").to_string_lossy().into_owned(),
            ..LexiconConfig::default()
        },
        ..Settings::default()
    }
}

async fn app_state(with_models: bool) -> (web::Data<AppState>, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let state = build_app_state(&settings(dir.path(), with_models)).await;
    (web::Data::new(state), dir)
}

fn post_json(body: Value) -> test::TestRequest {
    test::TestRequest::post().uri("/predict").set_json(body)
}

fn post_raw(body: &'static str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/predict")
        .insert_header(("content-type", "application/json"))
        .set_payload(body)
}

fn has_at_most_three_decimals(value: f64) -> bool {
    ((value * 1000.0).round() / 1000.0 - value).abs() < 1e-12
}

#[actix_web::test]
async fn test_health_check() {
    let (state, _dir) = app_state(true).await;
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp.message, "Sentiment Analysis API is running.");
}

#[actix_web::test]
async fn test_positive_review() {
    let (state, _dir) = app_state(true).await;
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let resp: PredictResponse =
        test::call_and_read_body_json(&app, post_json(json!({"review": "This movie was fantastic!"})).to_request())
            .await;
    assert_eq!(resp.sentiment, "Positive");
    assert_eq!(resp.confidence, Some(0.875));
}

#[actix_web::test]
async fn test_negative_review() {
    let (state, _dir) = app_state(true).await;
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let resp: PredictResponse = test::call_and_read_body_json(
        &app,
        post_json(json!({"review": "Absolutely terrible, a waste of time."})).to_request(),
    )
    .await;
    assert_eq!(resp.sentiment, "Negative");
    assert_eq!(resp.confidence, Some(0.964));
}

#[actix_web::test]
async fn test_confidence_is_a_rounded_probability() {
    let (state, _dir) = app_state(true).await;
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    for review in [
        "The acting was great and I loved the story",
        "Boring plot, the worst film ever.",
        "<br />Nothing here matches the vocabulary 12345",
    ] {
        let resp: PredictResponse =
            test::call_and_read_body_json(&app, post_json(json!({ "review": review })).to_request()).await;
        let confidence = resp.confidence.expect("logistic regression reports a confidence");
        assert!((0.0..=1.0).contains(&confidence), "{} out of range", confidence);
        assert!(has_at_most_three_decimals(confidence), "{} not rounded", confidence);
        assert!(resp.sentiment == "Positive" || resp.sentiment == "Negative");
    }
}

#[actix_web::test]
async fn test_markup_and_punctuation_do_not_change_the_verdict() {
    let (state, _dir) = app_state(true).await;
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let plain: PredictResponse =
        test::call_and_read_body_json(&app, post_json(json!({"review": "movie fantastic"})).to_request()).await;
    let noisy: PredictResponse = test::call_and_read_body_json(
        &app,
        post_json(json!({"review": "<p>This MOVIE was... FANTASTIC!!! 10/10</p>"})).to_request(),
    )
    .await;
    assert_eq!(plain, noisy);
}

#[actix_web::test]
async fn test_invalid_review_field_is_rejected() {
    let (state, _dir) = app_state(true).await;
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    for body in [
        json!({}),
        json!({"review": ""}),
        json!({"review": "   "}),
        json!({"review": 123}),
        json!({"review": null}),
        json!({"text": "wrong field"}),
    ] {
        let resp = test::call_service(&app, post_json(body.clone()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {}", body);
        let error: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(error.error, "The \"review\" field is missing, empty, or not a string.");
    }
}

#[actix_web::test]
async fn test_malformed_json_is_rejected() {
    let (state, _dir) = app_state(true).await;
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let resp = test::call_service(&app, post_raw("{\"review\": ").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = test::read_body_json(resp).await;
    assert!(error.error.starts_with("Error parsing JSON: "), "{}", error.error);
}

#[actix_web::test]
async fn test_body_is_parsed_without_json_content_type() {
    let (state, _dir) = app_state(true).await;
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/predict")
        .insert_header(("content-type", "text/plain"))
        .set_payload(r#"{"review": "This movie was fantastic!"}"#)
        .to_request();
    let resp: PredictResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp.sentiment, "Positive");
}

#[actix_web::test]
async fn test_unready_service_answers_500() {
    let (state, _dir) = app_state(false).await;
    assert!(!state.predictor.is_ready());
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let resp = test::call_service(&app, post_json(json!({"review": "This movie was fantastic!"})).to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(error.error, "Model or vectorizer not loaded.");

    // input validation still comes first
    let resp = test::call_service(&app, post_json(json!({"review": ""})).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_predict_rejects_get() {
    let (state, _dir) = app_state(true).await;
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let req = test::TestRequest::get().uri("/predict").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
}

#[actix_web::test]
async fn test_long_review_is_accepted() {
    let (state, _dir) = app_state(true).await;
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    // well past actix's default 256 KiB payload limit
    let review = "fantastic movie ".repeat(20_000);
    assert!(review.len() > 256 * 1024);

    let req = post_json(json!({ "review": review })).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: PredictResponse = test::read_body_json(resp).await;
    assert_eq!(body.sentiment, "Positive");
}

#[actix_web::test]
async fn test_oversized_body_gets_json_error() {
    let (state, _dir) = app_state(true).await;
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let review = "a".repeat(MAX_BODY_BYTES + 1);
    let req = post_json(json!({ "review": review })).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let error: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(error.error, format!("Request body exceeds {} bytes.", MAX_BODY_BYTES));
}
