use std::cell::RefCell;
use std::collections::HashMap;

use super::types::{sort_by_score_desc, SentimentClassifier, SentimentLabel, SentimentPrediction};
use super::ClassifierError;

/// What the mock does when asked to classify a given text.
#[derive(Debug, Clone)]
pub enum MockReply {
    Predictions(Vec<SentimentPrediction>),
    ApiError { status: u16, body: String },
    ConnectionRefused,
    Panic(String),
}

/// Build a sorted prediction list from raw (service label, score) pairs.
pub fn predictions(pairs: &[(&str, f64)]) -> Vec<SentimentPrediction> {
    let mut preds: Vec<SentimentPrediction> = pairs
        .iter()
        .map(|(label, score)| SentimentPrediction {
            label: SentimentLabel::from_service_label(label),
            score: *score,
        })
        .collect();
    sort_by_score_desc(&mut preds);
    preds
}

/// Mock classifier for testing. Scripted replies per text, with a default.
pub struct MockClassifier {
    default_reply: MockReply,
    replies: HashMap<String, MockReply>,
    calls: RefCell<Vec<String>>,
}

impl MockClassifier {
    pub fn new(default_reply: MockReply) -> Self {
        Self {
            default_reply,
            replies: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Every text gets the same prediction list.
    pub fn returning(pairs: &[(&str, f64)]) -> Self {
        Self::new(MockReply::Predictions(predictions(pairs)))
    }

    pub fn with_reply(mut self, text: &str, reply: MockReply) -> Self {
        self.replies.insert(text.to_string(), reply);
        self
    }

    /// Texts classified so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl SentimentClassifier for MockClassifier {
    fn classify(&self, text: &str) -> Result<Vec<SentimentPrediction>, ClassifierError> {
        self.calls.borrow_mut().push(text.to_string());

        match self.replies.get(text).unwrap_or(&self.default_reply) {
            MockReply::Predictions(preds) => Ok(preds.clone()),
            MockReply::ApiError { status, body } => Err(ClassifierError::Api {
                status: *status,
                body: body.clone(),
            }),
            MockReply::ConnectionRefused => {
                Err(ClassifierError::Connection("http://mock.invalid".to_string()))
            }
            MockReply::Panic(message) => panic!("{message}"),
        }
    }
}
