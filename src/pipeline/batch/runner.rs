//! Sequential batch runner: classifies a list of texts one at a time.
//!
//! Strictly sequential: one classifier call in flight, a blocking pause
//! between items, no cancellation. A failing item is recorded at its index
//! and the batch carries on.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use uuid::Uuid;

use super::types::*;
use crate::pipeline::classifier::{ClassifierError, SentimentClassifier};
use crate::pipeline::keywords::extract_keywords;

/// Runs batches against one classifier.
pub struct BatchRunner<'a> {
    classifier: &'a dyn SentimentClassifier,
    config: BatchConfig,
    pacer: Box<dyn Pacer + 'a>,
}

impl<'a> BatchRunner<'a> {
    pub fn new(classifier: &'a dyn SentimentClassifier, config: BatchConfig) -> Self {
        Self {
            classifier,
            config,
            pacer: Box::new(ThreadSleepPacer),
        }
    }

    pub fn with_pacer(mut self, pacer: Box<dyn Pacer + 'a>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Classify and extract keywords for a single text.
    ///
    /// Both failure channels of the classifier end up as `Failure`: a returned
    /// error and a panic inside `classify`.
    pub fn analyze_item(&self, text: &str) -> AnalysisOutcome {
        let classified = panic::catch_unwind(AssertUnwindSafe(|| self.classifier.classify(text)));
        let keywords = extract_keywords(text, self.config.keyword_count, &self.config.keyword_language);

        match classified {
            Ok(Ok(sentiment)) if !sentiment.is_empty() => AnalysisOutcome::Success {
                text: text.to_string(),
                sentiment,
                keywords,
            },
            Ok(Ok(_)) => AnalysisOutcome::Failure {
                text: text.to_string(),
                error: ClassifierError::EmptyResponse.to_string(),
            },
            Ok(Err(e)) => AnalysisOutcome::Failure {
                text: text.to_string(),
                error: e.to_string(),
            },
            Err(payload) => AnalysisOutcome::Failure {
                text: text.to_string(),
                error: panic_message(payload.as_ref()),
            },
        }
    }

    /// Analyze every text in input order. Output has the same length and order.
    pub fn run<S: AsRef<str>>(
        &self,
        texts: &[S],
        progress: Option<&dyn ProgressObserver>,
    ) -> Vec<AnalysisOutcome> {
        let start = Instant::now();
        let run_id = Uuid::new_v4();
        let total = texts.len();

        tracing::info!(
            run_id = %run_id,
            items = total,
            delay_ms = self.config.delay.as_millis() as u64,
            "Batch analysis started"
        );

        let mut outcomes = Vec::with_capacity(total);
        let mut failures = 0usize;

        for (i, text) in texts.iter().enumerate() {
            let outcome = self.analyze_item(text.as_ref());

            if let Some(error) = outcome.error() {
                failures += 1;
                tracing::warn!(run_id = %run_id, index = i, error = %error, "Sentiment analysis failed for item");
            } else {
                tracing::debug!(run_id = %run_id, index = i, "Item analyzed");
            }
            outcomes.push(outcome);

            if let Some(observer) = progress {
                observer.on_item_completed(i + 1, total);
            }

            if i + 1 < total {
                self.pacer.pause(self.config.delay);
            }
        }

        tracing::info!(
            run_id = %run_id,
            items = total,
            failures,
            duration_ms = start.elapsed().as_millis() as u64,
            "Batch analysis completed"
        );

        outcomes
    }
}

/// Analyze `texts` with the default keyword settings and the given pause.
pub fn batch_analyze_sentiment_with_keywords<S: AsRef<str>>(
    classifier: &dyn SentimentClassifier,
    texts: &[S],
    delay: Duration,
    progress: Option<&dyn ProgressObserver>,
) -> Vec<AnalysisOutcome> {
    let config = BatchConfig::default().with_delay(delay);
    BatchRunner::new(classifier, config).run(texts, progress)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "classifier panicked".to_string()
    }
}
