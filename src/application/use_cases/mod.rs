pub mod predict_sentiment;
