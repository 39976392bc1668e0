use std::io::BufWriter;

use printpdf::*;

use super::ExportError;
use crate::pipeline::classifier::Sentiment;
use crate::pipeline::normalize::{DistributionSummary, NormalizedRow};

pub const REPORT_TITLE: &str = "Sentiment Report";
const TEXT_PREVIEW_CHARS: usize = 50;
const PAGE_TOP: Mm = Mm(280.0);
const PAGE_BOTTOM: Mm = Mm(20.0);

/// A4 report: title, optional distribution line, one entry per row.
pub fn rows_to_pdf(
    rows: &[NormalizedRow],
    summary: Option<&DistributionSummary>,
) -> Result<Vec<u8>, ExportError> {
    let (doc, page1, layer1) = PdfDocument::new(REPORT_TITLE, Mm(210.0), Mm(297.0), "Layer 1");
    let mut layer = doc.get_page(page1).get_layer(layer1);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;

    let mut y = PAGE_TOP;

    layer.use_text(REPORT_TITLE, 14.0, Mm(20.0), y, &bold);
    y -= Mm(10.0);

    if let Some(summary) = summary {
        layer.use_text(summary_line(summary), 10.0, Mm(20.0), y, &font);
        y -= Mm(8.0);
    }

    for (i, row) in rows.iter().enumerate() {
        for line in wrap_text(&row_line(i + 1, row), 95) {
            if y < PAGE_BOTTOM {
                let (page, page_layer) = doc.add_page(Mm(210.0), Mm(297.0), "Layer 1");
                layer = doc.get_page(page).get_layer(page_layer);
                y = PAGE_TOP;
            }
            layer.use_text(&line, 9.0, Mm(20.0), y, &font);
            y -= Mm(4.5);
        }
        y -= Mm(1.5);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ExportError::Pdf(format!("buffer error: {e}")))
}

fn row_line(n: usize, row: &NormalizedRow) -> String {
    let preview: String = row.text.chars().take(TEXT_PREVIEW_CHARS).collect();
    match row.confidence_percent {
        Some(confidence) => format!(
            "{n}. {preview}... -> {} ({confidence:.2}%)",
            row.sentiment_label
        ),
        None => format!("{n}. {preview}... -> {}", row.sentiment_label),
    }
}

fn summary_line(summary: &DistributionSummary) -> String {
    let parts: Vec<String> = Sentiment::ALL
        .iter()
        .map(|s| match summary.percentage(*s) {
            Some(pct) => format!("{s}: {} ({pct:.2}%)", summary.count(*s)),
            None => format!("{s}: {}", summary.count(*s)),
        })
        .collect();
    format!("Distribution  {}", parts.join("  |  "))
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.chars().count() + word.chars().count() + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::classifier::SentimentLabel;
    use crate::pipeline::normalize::RowLabel;

    fn row(text: &str, confidence: Option<f64>) -> NormalizedRow {
        NormalizedRow {
            text: text.into(),
            sentiment_label: match confidence {
                Some(_) => RowLabel::Sentiment(SentimentLabel::Canonical(Sentiment::Negative)),
                None => RowLabel::Error,
            },
            confidence_percent: confidence,
            keywords_joined: None,
        }
    }

    #[test]
    fn report_is_a_pdf() {
        let bytes = rows_to_pdf(&[row("Late delivery", Some(87.5))], None).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn row_line_truncates_preview_to_fifty_chars() {
        let long = "x".repeat(80);
        let line = row_line(3, &row(&long, Some(87.5)));
        assert_eq!(line, format!("3. {}... -> negative (87.50%)", "x".repeat(50)));
    }

    #[test]
    fn row_line_for_failed_row_has_no_confidence() {
        assert_eq!(row_line(1, &row("down", None)), "1. down... -> error");
    }

    #[test]
    fn summary_line_lists_every_label() {
        let summary = DistributionSummary {
            counts: Sentiment::ALL.iter().map(|s| (*s, 1)).collect(),
            percentages: Sentiment::ALL.iter().map(|s| (*s, 33.33)).collect(),
        };
        let line = summary_line(&summary);
        assert!(line.contains("positive: 1 (33.33%)"));
        assert!(line.contains("neutral: 1"));
        assert!(line.contains("negative: 1"));
    }

    #[test]
    fn many_rows_paginate() {
        let rows: Vec<NormalizedRow> = (0..200).map(|i| row(&format!("row {i}"), Some(70.0))).collect();
        let bytes = rows_to_pdf(&rows, None).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn wrap_text_respects_width() {
        let lines = wrap_text("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
