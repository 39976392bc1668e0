use std::fmt;

use serde::{Deserialize, Serialize};

use super::ClassifierError;

/// Service class identifiers and the canonical label each one stands for.
const LABEL_MAP: &[(&str, Sentiment)] = &[
    ("LABEL_0", Sentiment::Negative),
    ("LABEL_1", Sentiment::Neutral),
    ("LABEL_2", Sentiment::Positive),
];

/// The three canonical sentiment classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    /// Case-insensitive match on the canonical names.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Label attached to a single prediction.
///
/// Identifiers the service documents are mapped onto [`Sentiment`]; anything
/// else is carried through verbatim so nothing the model says is lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SentimentLabel {
    Canonical(Sentiment),
    Other(String),
}

impl SentimentLabel {
    /// Map a raw service label through the fixed lookup table.
    pub fn from_service_label(raw: &str) -> Self {
        if let Some((_, sentiment)) = LABEL_MAP.iter().find(|(id, _)| *id == raw) {
            return SentimentLabel::Canonical(*sentiment);
        }
        match Sentiment::parse(raw) {
            Some(sentiment) => SentimentLabel::Canonical(sentiment),
            None => SentimentLabel::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SentimentLabel::Canonical(s) => s.as_str(),
            SentimentLabel::Other(raw) => raw,
        }
    }

    pub fn sentiment(&self) -> Option<Sentiment> {
        match self {
            SentimentLabel::Canonical(s) => Some(*s),
            SentimentLabel::Other(_) => None,
        }
    }
}

impl From<Sentiment> for SentimentLabel {
    fn from(sentiment: Sentiment) -> Self {
        SentimentLabel::Canonical(sentiment)
    }
}

impl From<String> for SentimentLabel {
    fn from(raw: String) -> Self {
        match Sentiment::parse(&raw) {
            Some(sentiment) => SentimentLabel::Canonical(sentiment),
            None => SentimentLabel::Other(raw),
        }
    }
}

impl From<SentimentLabel> for String {
    fn from(label: SentimentLabel) -> Self {
        label.as_str().to_string()
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One (label, score) pair from a classification response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentPrediction {
    pub label: SentimentLabel,
    pub score: f64,
}

impl SentimentPrediction {
    pub fn new(label: impl Into<SentimentLabel>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Sort predictions so index 0 is the top prediction. Stable for equal scores.
pub fn sort_by_score_desc(predictions: &mut [SentimentPrediction]) {
    predictions.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Sentiment classifier abstraction (allows mocking).
///
/// Implementations return predictions sorted by descending score.
pub trait SentimentClassifier {
    fn classify(&self, text: &str) -> Result<Vec<SentimentPrediction>, ClassifierError>;
}

impl<C: SentimentClassifier + ?Sized> SentimentClassifier for &C {
    fn classify(&self, text: &str) -> Result<Vec<SentimentPrediction>, ClassifierError> {
        (**self).classify(text)
    }
}

impl<C: SentimentClassifier + ?Sized> SentimentClassifier for Box<C> {
    fn classify(&self, text: &str) -> Result<Vec<SentimentPrediction>, ClassifierError> {
        (**self).classify(text)
    }
}
