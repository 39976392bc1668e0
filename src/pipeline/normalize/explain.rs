use super::{confidence_percent, CONFIDENCE_THRESHOLD};
use crate::pipeline::batch::AnalysisOutcome;
use crate::pipeline::classifier::SentimentPrediction;

/// One-sentence explanation of a classification result (sorted predictions).
pub fn explain_sentiment(predictions: &[SentimentPrediction]) -> String {
    let Some(top) = predictions.first() else {
        return "No sentiment prediction was returned for this text.".to_string();
    };

    let confidence = confidence_percent(top.score);
    if top.score < CONFIDENCE_THRESHOLD {
        format!(
            "The model leaned {} with {:.2}% confidence, below the {:.0}% threshold, so the text is treated as neutral.",
            top.label,
            confidence,
            CONFIDENCE_THRESHOLD * 100.0
        )
    } else {
        format!(
            "The text expresses a {} sentiment with {:.2}% confidence.",
            top.label, confidence
        )
    }
}

/// Explanation for an error reported instead of predictions.
pub fn explain_failure(error: &str) -> String {
    format!("The text could not be analyzed: {error}.")
}

pub fn explain_outcome(outcome: &AnalysisOutcome) -> String {
    match outcome {
        AnalysisOutcome::Success { sentiment, .. } => explain_sentiment(sentiment),
        AnalysisOutcome::Failure { error, .. } => explain_failure(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::classifier::predictions;

    #[test]
    fn confident_result_names_label_and_percentage() {
        let explanation = explain_sentiment(&predictions(&[
            ("positive", 0.92),
            ("neutral", 0.06),
            ("negative", 0.02),
        ]));
        assert!(explanation.to_lowercase().contains("positive"));
        assert!(explanation.contains("92.00%"));
    }

    #[test]
    fn low_confidence_mentions_neutral_and_threshold() {
        let explanation = explain_sentiment(&predictions(&[("negative", 0.55), ("neutral", 0.45)]));
        assert!(explanation.contains("negative"));
        assert!(explanation.contains("neutral"));
        assert!(explanation.contains("60%"));
    }

    #[test]
    fn error_result_could_not_be_analyzed() {
        let explanation = explain_failure("API error");
        assert!(explanation.to_lowercase().contains("could not be analyzed"));
    }

    #[test]
    fn empty_result_reports_no_sentiment() {
        let explanation = explain_sentiment(&[]);
        assert!(explanation.to_lowercase().contains("no sentiment"));
    }

    #[test]
    fn outcome_explanations_follow_the_variant() {
        let failed = AnalysisOutcome::Failure {
            text: "x".into(),
            error: "timeout".into(),
        };
        assert!(explain_outcome(&failed).contains("timeout"));

        let ok = AnalysisOutcome::Success {
            text: "x".into(),
            sentiment: predictions(&[("LABEL_2", 0.8)]),
            keywords: vec![],
        };
        assert!(explain_outcome(&ok).contains("positive"));
    }
}
