// src/bin/sentiment-ui.rs
use std::io;

use clap::Parser;

use sentiment_service::cli::UiArgs;
use sentiment_service::client::{Display, Feedback, ReviewSession, SentimentApiClient};
use sentiment_service::config::{ConsoleTarget, LoggingConfig};
use sentiment_service::infrastructure::adapters::logs::SystemLogAdapter;

fn main() -> io::Result<()> {
    let args = UiArgs::parse();

    // Only problems are logged, and on stderr; stdout carries the session itself.
    let _logs = SystemLogAdapter::init(&LoggingConfig {
        level: "warn".to_string(),
        console: ConsoleTarget::Stderr,
        ..LoggingConfig::default()
    });

    let mut display = Display::stdout();
    let client = match SentimentApiClient::new(&args.api_url) {
        Ok(client) => client,
        Err(e) => {
            display.show(&Feedback::error(format!("An unexpected error occurred: {}", e)))?;
            std::process::exit(2);
        }
    };

    let mut session = ReviewSession::new(client, display);
    match args.review {
        Some(review) => {
            session.submit_and_show(&review)?;
            Ok(())
        }
        None => session.run(io::stdin().lock()),
    }
}
