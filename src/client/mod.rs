/*
Client Module

Terminal front-end for the prediction service: a blocking HTTP client for `/predict`,
styled terminal output and the interactive review session that ties them together.
*/

pub mod api_client;
pub mod display;
pub mod session;

pub use api_client::{ClientError, SentimentApiClient};
pub use display::{Display, Feedback, FeedbackLevel};
pub use session::ReviewSession;
