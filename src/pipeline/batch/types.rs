use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_DELAY_SECS;
use crate::pipeline::classifier::SentimentPrediction;
use crate::pipeline::keywords::{DEFAULT_LANGUAGE, DEFAULT_TOP_N};

// ═══════════════════════════════════════════
// Outcomes
// ═══════════════════════════════════════════

/// Result of analyzing one text. Exactly one case per input item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Success {
        text: String,
        /// Sorted by descending score, never empty.
        sentiment: Vec<SentimentPrediction>,
        keywords: Vec<String>,
    },
    Failure {
        text: String,
        error: String,
    },
}

impl AnalysisOutcome {
    pub fn text(&self) -> &str {
        match self {
            AnalysisOutcome::Success { text, .. } | AnalysisOutcome::Failure { text, .. } => text,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, AnalysisOutcome::Failure { .. })
    }

    /// The highest-score prediction of a successful outcome.
    pub fn top_prediction(&self) -> Option<&SentimentPrediction> {
        match self {
            AnalysisOutcome::Success { sentiment, .. } => sentiment.first(),
            AnalysisOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AnalysisOutcome::Success { .. } => None,
            AnalysisOutcome::Failure { error, .. } => Some(error),
        }
    }
}

// ═══════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Pause between consecutive items (not after the last one).
    pub delay: Duration,
    /// Keywords extracted per item.
    pub keyword_count: usize,
    /// Language hint for keyword extraction.
    pub keyword_language: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs_f64(DEFAULT_DELAY_SECS),
            keyword_count: DEFAULT_TOP_N,
            keyword_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl BatchConfig {
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

// ═══════════════════════════════════════════
// Collaborator seams
// ═══════════════════════════════════════════

/// Receives `(completed, total)` after every item.
pub trait ProgressObserver {
    fn on_item_completed(&self, completed: usize, total: usize);
}

impl<F: Fn(usize, usize)> ProgressObserver for F {
    fn on_item_completed(&self, completed: usize, total: usize) {
        self(completed, total)
    }
}

/// Blocking wait between classifier calls.
pub trait Pacer {
    fn pause(&self, delay: Duration);
}

/// Sleeps the calling thread.
pub struct ThreadSleepPacer;

impl Pacer for ThreadSleepPacer {
    fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

impl<P: Pacer + ?Sized> Pacer for &P {
    fn pause(&self, delay: Duration) {
        (**self).pause(delay)
    }
}
