pub mod cli;
pub mod config;
pub mod export;
pub mod pipeline;

pub use cli::run;
pub use pipeline::batch::{batch_analyze_sentiment_with_keywords, AnalysisOutcome, BatchRunner};
pub use pipeline::classifier::{HuggingFaceClassifier, SentimentClassifier, SentimentPrediction};
pub use pipeline::keywords::extract_keywords;
pub use pipeline::normalize::{compute_sentiment_distribution, results_to_dataframe};
