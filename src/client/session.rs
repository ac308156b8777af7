use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::client::api_client::{ClientError, ErrorDetail, PredictReply, SentimentApiClient};
use crate::client::display::{Display, Feedback};

pub const TITLE: &str = "Sentiment Analysis of Text Reviews";
pub const PROMPT: &str = "Enter the review text below (finish with an empty line, Ctrl+D to quit):";
pub const BUSY: &str = "Analyzing...";
pub const EMPTY_INPUT: &str = "Please enter a review to analyze.";
pub const UNDETERMINED: &str = "Could not determine the sentiment. Please try another review.";
pub const UNKNOWN_API_ERROR: &str = "An unknown error occurred.";

/// Maps the outcome of one predict call to the message shown to the user.
pub fn feedback_for(endpoint: &str, outcome: Result<PredictReply, ClientError>) -> Feedback {
    match outcome {
        Ok(PredictReply::Sentiment(sentiment)) => match sentiment.as_deref() {
            Some("Positive") => Feedback::success("Prediction: Positive 👍"),
            Some("Negative") => Feedback::error("Prediction: Negative 👎"),
            _ => Feedback::warning(UNDETERMINED),
        },
        Ok(PredictReply::Rejected { status, detail }) => match detail {
            ErrorDetail::Json(message) => Feedback::error(format!(
                "API Error: {}",
                message.as_deref().unwrap_or(UNKNOWN_API_ERROR)
            )),
            ErrorDetail::Raw(body) => {
                Feedback::error(format!("API Error: Status code {} - {}", status, body))
            }
        },
        Err(ClientError::Connection { .. }) => Feedback::error(format!(
            "Connection Error: Could not connect to the API at {}. \
             Please ensure the prediction service is running.",
            endpoint
        )),
        Err(e) => Feedback::error(format!("An unexpected error occurred: {}", e)),
    }
}

/// Collects reviews from the user and renders the service's verdict.
pub struct ReviewSession<W: Write> {
    client: SentimentApiClient,
    display: Display<W>,
}

impl<W: Write> ReviewSession<W> {
    pub fn new(client: SentimentApiClient, display: Display<W>) -> Self {
        Self { client, display }
    }

    /// Analyzes one review. Blank input never reaches the network.
    pub fn submit(&mut self, input: &str) -> io::Result<Feedback> {
        if input.trim().is_empty() {
            return Ok(Feedback::warning(EMPTY_INPUT));
        }

        self.display.show_busy(BUSY)?;
        let outcome = self.client.predict(input);
        self.display.clear_busy()?;

        if let Err(e) = &outcome {
            warn!(error = %e, "predict request failed");
        }
        Ok(feedback_for(self.client.endpoint().as_str(), outcome))
    }

    pub fn submit_and_show(&mut self, input: &str) -> io::Result<Feedback> {
        let feedback = self.submit(input)?;
        self.display.show(&feedback)?;
        Ok(feedback)
    }

    /// Reads reviews until end of input. An empty line submits what has been typed so far;
    /// a trailing review without one is submitted at end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        self.display.show_title(TITLE)?;
        self.display.prompt(PROMPT)?;

        let mut review = String::new();
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                self.submit_and_show(&review)?;
                review.clear();
                self.display.prompt(PROMPT)?;
                continue;
            }
            if !review.is_empty() {
                review.push('\n');
            }
            review.push_str(&line);
        }

        if !review.is_empty() {
            self.submit_and_show(&review)?;
        }
        Ok(())
    }

    pub fn into_display(self) -> Display<W> {
        self.display
    }
}
