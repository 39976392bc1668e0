//! Result normalization.
//!
//! Turns batch outcomes into the canonical row view and the aggregate
//! distribution. Both apply the same confidence-threshold policy: a top
//! prediction scoring below [`CONFIDENCE_THRESHOLD`] counts as neutral, while
//! the displayed confidence stays the original top score.

pub mod rows;
pub mod distribution;
pub mod chart;
pub mod explain;

pub use rows::*;
pub use distribution::*;
pub use chart::*;
pub use explain::*;

use crate::pipeline::classifier::{Sentiment, SentimentLabel, SentimentPrediction};

/// Top scores strictly below this are reinterpreted as neutral.
pub const CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Label after the threshold policy.
pub fn effective_label(top: &SentimentPrediction) -> SentimentLabel {
    if top.score < CONFIDENCE_THRESHOLD {
        SentimentLabel::Canonical(Sentiment::Neutral)
    } else {
        top.label.clone()
    }
}

/// Score in [0,1] as a percentage rounded to 2 decimals.
pub fn confidence_percent(score: f64) -> f64 {
    round2(score * 100.0)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
