use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::types::{sort_by_score_desc, SentimentClassifier, SentimentLabel, SentimentPrediction};
use super::ClassifierError;
use crate::config::{ClassifierConfig, ConfigError};

/// Blocking HTTP client for the hosted 3-class sentiment model.
pub struct HuggingFaceClassifier {
    api_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HuggingFaceClassifier {
    /// Build the client from validated configuration.
    pub fn new(config: &ClassifierConfig) -> Result<Self, ConfigError> {
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential(crate::config::API_KEY_VAR));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            api_url: config.api_url.trim().to_string(),
            api_key: config.api_key.clone(),
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Classify one text. Never retries; a failed call is reported as-is.
    pub fn analyze_sentiment(&self, text: &str) -> Result<Vec<SentimentPrediction>, ClassifierError> {
        let body = InferenceRequest { inputs: text };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ClassifierError::Connection(self.api_url.clone())
                } else if e.is_timeout() {
                    ClassifierError::Timeout(self.timeout_secs)
                } else {
                    ClassifierError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "Classifier returned non-200 status");
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: InferenceResponse = response.json().map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout(self.timeout_secs)
            } else {
                ClassifierError::ResponseParsing(e.to_string())
            }
        })?;

        let predictions = normalize_response(parsed)?;
        tracing::debug!(
            top = predictions[0].label.as_str(),
            score = predictions[0].score,
            "Classifier response received"
        );
        Ok(predictions)
    }
}

impl SentimentClassifier for HuggingFaceClassifier {
    fn classify(&self, text: &str) -> Result<Vec<SentimentPrediction>, ClassifierError> {
        self.analyze_sentiment(text)
    }
}

/// Request body for the inference endpoint
#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct RawPrediction {
    label: String,
    score: f64,
}

/// The endpoint wraps single-input results in an outer array; some
/// deployments return the inner list directly.
#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<RawPrediction>>),
    Flat(Vec<RawPrediction>),
}

/// Map service labels, sort by descending score, reject empty results.
fn normalize_response(response: InferenceResponse) -> Result<Vec<SentimentPrediction>, ClassifierError> {
    let raw = match response {
        InferenceResponse::Nested(mut outer) => {
            if outer.is_empty() {
                return Err(ClassifierError::EmptyResponse);
            }
            outer.swap_remove(0)
        }
        InferenceResponse::Flat(inner) => inner,
    };

    if raw.is_empty() {
        return Err(ClassifierError::EmptyResponse);
    }
    if raw.len() != 3 {
        tracing::warn!(classes = raw.len(), "Expected 3 sentiment classes from classifier");
    }

    let mut predictions: Vec<SentimentPrediction> = raw
        .into_iter()
        .map(|p| SentimentPrediction {
            label: SentimentLabel::from_service_label(&p.label),
            score: p.score,
        })
        .collect();
    sort_by_score_desc(&mut predictions);
    Ok(predictions)
}
