/*
Client UI Integration Tests

Run the terminal client against a live service bound to an ephemeral port. The service lives
on its own thread with its own actix system; the blocking client drives it from the test thread.
*/
use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::mpsc;
use std::thread;

use actix_web::{web, App, HttpServer};

use sentiment_service::client::session::EMPTY_INPUT;
use sentiment_service::client::{Display, FeedbackLevel, ReviewSession, SentimentApiClient};
use sentiment_service::config::{LexiconConfig, ModelConfig, Settings};
use sentiment_service::delivery::router::configure;
use sentiment_service::setup::build_app_state;

fn spawn_service(with_models: bool) -> SocketAddr {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let dir = tempfile::tempdir().unwrap();
        let models = format!("{}/models", env!("CARGO_MANIFEST_DIR"));
        let settings = Settings {
            model: ModelConfig {
                vectorizer_path: format!("{}/tfidf_vectorizer.json", models),
                classifier_path: if with_models {
                    format!("{}/lr_model.json", models)
                } else {
                    dir.path().join("absent.json").to_string_lossy().into_owned()
                },
            },
            lexicon: LexiconConfig {
                data_dir: dir.path().to_string_lossy().into_owned(),
                ..LexiconConfig::default()
            },
            ..Settings::default()
        };

        actix_web::rt::System::new().block_on(async move {
            let data = web::Data::new(build_app_state(&settings).await);
            let server = HttpServer::new(move || App::new().app_data(data.clone()).configure(configure))
                .workers(1)
                .bind(("127.0.0.1", 0))
                .unwrap();
            tx.send(server.addrs()[0]).unwrap();
            server.run().await.unwrap();
        });
    });

    rx.recv().unwrap()
}

fn session(addr: SocketAddr) -> ReviewSession<Vec<u8>> {
    let client = SentimentApiClient::new(&format!("http://{}", addr)).unwrap();
    ReviewSession::new(client, Display::new(Vec::new()))
}

#[test]
fn test_positive_and_negative_reviews() {
    let mut session = session(spawn_service(true));

    let feedback = session.submit("This movie was fantastic!").unwrap();
    assert_eq!(feedback.level, FeedbackLevel::Success);
    assert_eq!(feedback.text, "Prediction: Positive 👍");

    let feedback = session.submit("Absolutely terrible, a waste of time.").unwrap();
    assert_eq!(feedback.level, FeedbackLevel::Error);
    assert_eq!(feedback.text, "Prediction: Negative 👎");
}

#[test]
fn test_blank_review_is_not_sent() {
    let mut session = session(spawn_service(true));

    let feedback = session.submit("  \n ").unwrap();
    assert_eq!(feedback.level, FeedbackLevel::Warning);
    assert_eq!(feedback.text, EMPTY_INPUT);
}

#[test]
fn test_unready_service_error_is_rendered() {
    let mut session = session(spawn_service(false));

    let feedback = session.submit("This movie was fantastic!").unwrap();
    assert_eq!(feedback.level, FeedbackLevel::Error);
    assert_eq!(feedback.text, "API Error: Model or vectorizer not loaded.");
}

#[test]
fn test_interactive_session_renders_every_review() {
    let mut session = session(spawn_service(true));

    let input = Cursor::new("This movie was fantastic!\n\nAbsolutely terrible,\na waste of time.\n");
    session.run(input).unwrap();

    let written = String::from_utf8(session.into_display().into_inner()).unwrap();
    assert!(written.contains("Sentiment Analysis of Text Reviews"));
    assert!(written.contains("Prediction: Positive 👍"));
    assert!(written.contains("Prediction: Negative 👎"));
}

#[test]
fn test_stopped_service_reports_connection_error() {
    // bind and release a port so nothing is listening on it
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut session = session(addr);

    let feedback = session.submit("This movie was fantastic!").unwrap();
    assert_eq!(feedback.level, FeedbackLevel::Error);
    assert!(
        feedback.text.starts_with(&format!(
            "Connection Error: Could not connect to the API at http://{}/predict.",
            addr
        )),
        "{}",
        feedback.text
    );
}
