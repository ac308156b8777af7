use actix_web::{middleware, web, App, HttpServer};
use tracing::info;

use crate::application::use_cases::predict_sentiment::PredictSentimentUseCase;
use crate::config::ServerConfig;

/// Read-only request context, built once before the server starts.
#[derive(Clone)]
pub struct AppState {
    pub predictor: PredictSentimentUseCase,
}

pub async fn run_server(server: &ServerConfig, state: AppState) -> std::io::Result<()> {
    let data = web::Data::new(state);
    let address = server.bind_address();

    let mut http_server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(middleware::Logger::default())
            .configure(crate::delivery::router::configure)
    });
    if server.workers > 0 {
        http_server = http_server.workers(server.workers);
    }

    info!(%address, "starting sentiment prediction service");
    http_server.bind(&address)?.run().await
}
