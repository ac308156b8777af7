use std::sync::Arc;

use tracing::{error, warn};

use crate::application::use_cases::predict_sentiment::PredictSentimentUseCase;
use crate::config::Settings;
use crate::delivery::{run_server, AppState};
use crate::infrastructure::adapters::ml::load_models;
use crate::infrastructure::adapters::nlp::{LexiconProvisioner, ReviewPreprocessor};

/// Provisions the lexicon and loads the model artifacts.
///
/// Missing or broken artifacts leave the service up but unready; predict requests then
/// answer 500 until it is restarted with valid files.
pub async fn build_app_state(settings: &Settings) -> AppState {
    let lexicon = LexiconProvisioner::new(&settings.lexicon).provision().await;
    let preprocessor = Arc::new(ReviewPreprocessor::new(lexicon));

    let models = match load_models(&settings.model) {
        Ok(models) => Some(models),
        Err(e) => {
            error!(error = %e, "failed to load model or vectorizer");
            None
        }
    };

    let predictor = PredictSentimentUseCase::new(preprocessor, models);
    if !predictor.is_ready() {
        warn!("service is running without a model; predictions will fail");
    }

    AppState { predictor }
}

pub async fn setup_and_run(settings: Settings) -> std::io::Result<()> {
    let state = build_app_state(&settings).await;
    run_server(&settings.server, state).await
}
