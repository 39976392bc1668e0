//! Numeric series handed to the chart renderer.

use serde::Serialize;

use super::rows::NormalizedRow;

pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// One equal-width bucket of the confidence histogram, in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Rows per displayed label, `error` included, in first-seen order.
pub fn row_label_counts(rows: &[NormalizedRow]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for row in rows {
        let label = row.sentiment_label.as_str();
        match counts.iter_mut().find(|(l, _)| l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label.to_string(), 1)),
        }
    }
    counts
}

/// Distribution of confidence values over [0, 100].
///
/// Rows without a confidence are skipped; 100 lands in the last bucket.
pub fn confidence_histogram(rows: &[NormalizedRow], bins: usize) -> Vec<HistogramBin> {
    if bins == 0 {
        return Vec::new();
    }

    let width = 100.0 / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: i as f64 * width,
            upper: (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for confidence in rows.iter().filter_map(|r| r.confidence_percent) {
        let clamped = confidence.clamp(0.0, 100.0);
        let index = ((clamped / width) as usize).min(bins - 1);
        histogram[index].count += 1;
    }

    histogram
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::classifier::{Sentiment, SentimentLabel};
    use crate::pipeline::normalize::RowLabel;

    fn row(label: RowLabel, confidence: Option<f64>) -> NormalizedRow {
        NormalizedRow {
            text: "t".into(),
            sentiment_label: label,
            confidence_percent: confidence,
            keywords_joined: None,
        }
    }

    fn positive(confidence: f64) -> NormalizedRow {
        row(
            RowLabel::Sentiment(SentimentLabel::Canonical(Sentiment::Positive)),
            Some(confidence),
        )
    }

    #[test]
    fn label_counts_include_errors_in_first_seen_order() {
        let rows = vec![
            row(RowLabel::Error, None),
            positive(91.0),
            row(RowLabel::Error, None),
        ];
        assert_eq!(
            row_label_counts(&rows),
            vec![("error".to_string(), 2), ("positive".to_string(), 1)]
        );
    }

    #[test]
    fn histogram_buckets_and_edges() {
        let rows = vec![positive(0.0), positive(4.99), positive(5.0), positive(100.0), row(RowLabel::Error, None)];
        let hist = confidence_histogram(&rows, DEFAULT_HISTOGRAM_BINS);

        assert_eq!(hist.len(), 20);
        assert_eq!(hist[0].count, 2);
        assert_eq!(hist[1].count, 1);
        assert_eq!(hist[19].count, 1);
        assert_eq!(hist.iter().map(|b| b.count).sum::<usize>(), 4);
        assert_eq!(hist[19].upper, 100.0);
    }

    #[test]
    fn zero_bins_yields_empty_histogram() {
        assert!(confidence_histogram(&[positive(50.0)], 0).is_empty());
    }
}
