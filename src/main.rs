// src/main.rs
use clap::Parser;
use tracing::{error, info};

use sentiment_service::cli::ServiceArgs;
use sentiment_service::config::LoggingConfig;
use sentiment_service::infrastructure::adapters::logs::SystemLogAdapter;
use sentiment_service::setup::setup_and_run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = ServiceArgs::parse();

    let settings = match args.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            // Logging is configured from the settings, so report with the defaults.
            let _logs = SystemLogAdapter::init(&LoggingConfig::default());
            error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let _logs = match SystemLogAdapter::init(&settings.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };
    info!(config = ?args.config_path().0, "configuration loaded");

    setup_and_run(settings).await
}
