use std::fmt;

use serde::Serialize;

use super::{confidence_percent, effective_label};
use crate::pipeline::batch::AnalysisOutcome;
use crate::pipeline::classifier::SentimentLabel;

/// Label shown in the row view: the effective sentiment, or `error`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum RowLabel {
    Sentiment(SentimentLabel),
    Error,
}

impl RowLabel {
    pub fn as_str(&self) -> &str {
        match self {
            RowLabel::Sentiment(label) => label.as_str(),
            RowLabel::Error => "error",
        }
    }
}

impl From<RowLabel> for String {
    fn from(label: RowLabel) -> Self {
        label.as_str().to_string()
    }
}

impl fmt::Display for RowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Canonical per-item view consumed by charts and exports.
///
/// `None` in `confidence_percent` / `keywords_joined` means not applicable
/// (failed items).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    pub text: String,
    #[serde(rename = "sentiment")]
    pub sentiment_label: RowLabel,
    #[serde(rename = "confidence")]
    pub confidence_percent: Option<f64>,
    #[serde(rename = "keywords")]
    pub keywords_joined: Option<String>,
}

impl NormalizedRow {
    pub fn from_outcome(outcome: &AnalysisOutcome) -> Self {
        match outcome {
            AnalysisOutcome::Success {
                text,
                sentiment,
                keywords,
            } => {
                // Success always carries at least one prediction.
                let (label, confidence) = match sentiment.first() {
                    Some(top) => (RowLabel::Sentiment(effective_label(top)), Some(confidence_percent(top.score))),
                    None => (RowLabel::Error, None),
                };
                NormalizedRow {
                    text: text.clone(),
                    sentiment_label: label,
                    confidence_percent: confidence,
                    keywords_joined: Some(keywords.join(", ")),
                }
            }
            AnalysisOutcome::Failure { text, .. } => NormalizedRow {
                text: text.clone(),
                sentiment_label: RowLabel::Error,
                confidence_percent: None,
                keywords_joined: None,
            },
        }
    }

    /// Text cut to `max_chars` characters, with `...` appended when cut.
    pub fn display_text(&self, max_chars: usize) -> String {
        truncate_chars(&self.text, max_chars)
    }
}

/// One row per outcome, in input order.
pub fn results_to_dataframe(outcomes: &[AnalysisOutcome]) -> Vec<NormalizedRow> {
    outcomes.iter().map(NormalizedRow::from_outcome).collect()
}

pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::classifier::predictions;

    fn success(text: &str, pairs: &[(&str, f64)], keywords: &[&str]) -> AnalysisOutcome {
        AnalysisOutcome::Success {
            text: text.to_string(),
            sentiment: predictions(pairs),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn failure(text: &str) -> AnalysisOutcome {
        AnalysisOutcome::Failure {
            text: text.to_string(),
            error: "API error 500: boom".to_string(),
        }
    }

    #[test]
    fn confident_positive_keeps_label_and_score() {
        let outcome = success(
            "I love this!",
            &[("positive", 0.91), ("neutral", 0.06), ("negative", 0.03)],
            &["love"],
        );
        let row = NormalizedRow::from_outcome(&outcome);

        assert_eq!(row.sentiment_label.as_str(), "positive");
        assert_eq!(row.confidence_percent, Some(91.0));
        assert_eq!(row.keywords_joined.as_deref(), Some("love"));
    }

    #[test]
    fn low_confidence_is_relabelled_neutral_with_original_score() {
        let outcome = success(
            "I love this!",
            &[("positive", 0.55), ("neutral", 0.30), ("negative", 0.15)],
            &[],
        );
        let row = NormalizedRow::from_outcome(&outcome);

        assert_eq!(row.sentiment_label.as_str(), "neutral");
        assert_eq!(row.confidence_percent, Some(55.0));
    }

    #[test]
    fn threshold_boundary_is_exclusive_below() {
        let below = success("a", &[("negative", 0.59), ("neutral", 0.41)], &[]);
        let at = success("b", &[("negative", 0.6), ("neutral", 0.4)], &[]);

        let rows = results_to_dataframe(&[below, at]);
        assert_eq!(rows[0].sentiment_label.as_str(), "neutral");
        assert_eq!(rows[1].sentiment_label.as_str(), "negative");
    }

    #[test]
    fn failure_renders_error_with_no_confidence_or_keywords() {
        let row = NormalizedRow::from_outcome(&failure("broken"));
        assert_eq!(row.sentiment_label, RowLabel::Error);
        assert_eq!(row.text, "broken");
        assert!(row.confidence_percent.is_none());
        assert!(row.keywords_joined.is_none());
    }

    #[test]
    fn rows_preserve_order_and_cardinality() {
        let outcomes = vec![
            success("one", &[("positive", 0.9)], &[]),
            failure("two"),
            success("three", &[("negative", 0.8)], &[]),
            failure("two"),
        ];
        let rows = results_to_dataframe(&outcomes);

        assert_eq!(rows.len(), outcomes.len());
        let texts: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three", "two"]);
    }

    #[test]
    fn keywords_are_comma_joined() {
        let row = NormalizedRow::from_outcome(&success(
            "x",
            &[("positive", 0.9)],
            &["battery", "screen", "price"],
        ));
        assert_eq!(row.keywords_joined.as_deref(), Some("battery, screen, price"));
    }

    #[test]
    fn confident_unknown_label_passes_through() {
        let row = NormalizedRow::from_outcome(&success("x", &[("LABEL_9", 0.8)], &[]));
        assert_eq!(row.sentiment_label.as_str(), "LABEL_9");
    }

    #[test]
    fn row_serializes_with_export_column_names() {
        let row = NormalizedRow::from_outcome(&failure("x"));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["sentiment"], "error");
        assert!(json["confidence"].is_null());
        assert!(json["keywords"].is_null());
    }

    #[test]
    fn display_text_truncates_on_char_boundaries() {
        let row = NormalizedRow {
            text: "héllo wörld".into(),
            sentiment_label: RowLabel::Error,
            confidence_percent: None,
            keywords_joined: None,
        };
        assert_eq!(row.display_text(5), "héllo...");
        assert_eq!(row.display_text(50), "héllo wörld");
    }
}
