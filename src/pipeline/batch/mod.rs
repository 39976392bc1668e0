//! Batch orchestration: classifier + keyword extraction over a list of texts.

pub mod types;
pub mod runner;
pub mod input;

pub use types::*;
pub use runner::{batch_analyze_sentiment_with_keywords, BatchRunner};
pub use input::texts_from_plain_text;
