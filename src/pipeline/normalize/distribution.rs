use std::collections::BTreeMap;

use serde::Serialize;

use super::{effective_label, round2};
use crate::pipeline::batch::AnalysisOutcome;
use crate::pipeline::classifier::{Sentiment, SentimentLabel};

/// Counts and percentages per canonical sentiment across a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    /// Always holds all three canonical labels.
    pub counts: BTreeMap<Sentiment, usize>,
    /// Empty when nothing was counted.
    pub percentages: BTreeMap<Sentiment, f64>,
}

impl DistributionSummary {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn count(&self, sentiment: Sentiment) -> usize {
        self.counts.get(&sentiment).copied().unwrap_or(0)
    }

    pub fn percentage(&self, sentiment: Sentiment) -> Option<f64> {
        self.percentages.get(&sentiment).copied()
    }
}

/// Aggregate outcomes into a distribution.
///
/// Failed items are counted as neutral. Successes whose effective label is
/// not one of the canonical three are left out of the counts.
pub fn compute_sentiment_distribution(outcomes: &[AnalysisOutcome]) -> DistributionSummary {
    let mut counts: BTreeMap<Sentiment, usize> = Sentiment::ALL.iter().map(|s| (*s, 0)).collect();
    let mut skipped = 0usize;

    for outcome in outcomes {
        let bucket = match outcome {
            AnalysisOutcome::Success { sentiment, .. } => match sentiment.first().map(effective_label) {
                Some(SentimentLabel::Canonical(s)) => Some(s),
                Some(SentimentLabel::Other(_)) | None => None,
            },
            AnalysisOutcome::Failure { .. } => Some(Sentiment::Neutral),
        };

        match bucket {
            Some(s) => *counts.entry(s).or_insert(0) += 1,
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "Outcomes with unrecognized labels left out of the distribution");
    }

    let total: usize = counts.values().sum();
    let percentages = if total == 0 {
        BTreeMap::new()
    } else {
        counts
            .iter()
            .map(|(s, n)| (*s, round2(*n as f64 / total as f64 * 100.0)))
            .collect()
    };

    DistributionSummary { counts, percentages }
}
