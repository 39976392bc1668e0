//! Export encoders for normalized rows.
//!
//! Every encoder produces bytes; [`write_export`] puts them on disk under a
//! timestamped file name.

pub mod csv_export;
pub mod json_export;
pub mod pdf_report;

pub use csv_export::rows_to_csv;
pub use json_export::{rows_to_json, rows_to_json_lines};
pub use pdf_report::rows_to_pdf;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::pipeline::normalize::{DistributionSummary, NormalizedRow};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF error: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    #[value(name = "jsonl")]
    JsonLines,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::JsonLines => "jsonl",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// `sentiment_analysis_YYYYMMDD_HHMMSS.<ext>`
pub fn default_file_name(format: ExportFormat, at: DateTime<Local>) -> String {
    format!(
        "sentiment_analysis_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Encode rows in `format`. The summary is only rendered by the PDF report.
pub fn encode(
    format: ExportFormat,
    rows: &[NormalizedRow],
    summary: Option<&DistributionSummary>,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Csv => rows_to_csv(rows),
        ExportFormat::Json => rows_to_json(rows),
        ExportFormat::JsonLines => rows_to_json_lines(rows),
        ExportFormat::Pdf => rows_to_pdf(rows, summary),
    }
}

/// Write rows into `dir` (created if missing) under the default file name.
pub fn write_export(
    dir: &Path,
    format: ExportFormat,
    rows: &[NormalizedRow],
    summary: Option<&DistributionSummary>,
) -> Result<PathBuf, ExportError> {
    let bytes = encode(format, rows, summary)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(default_file_name(format, Local::now()));
    fs::write(&path, bytes)?;

    tracing::info!(
        path = %path.display(),
        format = format.extension(),
        rows = rows.len(),
        "Export written"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::pipeline::batch::AnalysisOutcome;
    use crate::pipeline::classifier::predictions;
    use crate::pipeline::normalize::{compute_sentiment_distribution, results_to_dataframe};

    fn sample_outcomes() -> Vec<AnalysisOutcome> {
        vec![
            AnalysisOutcome::Success {
                text: "The battery lasts all day, great phone".into(),
                sentiment: predictions(&[("LABEL_2", 0.91), ("LABEL_1", 0.06), ("LABEL_0", 0.03)]),
                keywords: vec!["battery".into(), "phone".into()],
            },
            AnalysisOutcome::Failure {
                text: "Unreachable, \"quoted\" text".into(),
                error: "API error 503: Service Unavailable".into(),
            },
        ]
    }

    #[test]
    fn default_file_name_is_timestamped() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            default_file_name(ExportFormat::Csv, at),
            "sentiment_analysis_20240309_140507.csv"
        );
        assert_eq!(
            default_file_name(ExportFormat::JsonLines, at),
            "sentiment_analysis_20240309_140507.jsonl"
        );
    }

    #[test]
    fn write_export_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("data").join("exports");
        let rows = results_to_dataframe(&sample_outcomes());

        let path = write_export(&dir, ExportFormat::Json, &rows, None).unwrap();

        assert!(path.starts_with(&dir));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
        let written: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(written.as_array().unwrap().len(), 2);
    }

    #[test]
    fn every_format_encodes() {
        let outcomes = sample_outcomes();
        let rows = results_to_dataframe(&outcomes);
        let summary = compute_sentiment_distribution(&outcomes);

        for format in [
            ExportFormat::Csv,
            ExportFormat::Json,
            ExportFormat::JsonLines,
            ExportFormat::Pdf,
        ] {
            let bytes = encode(format, &rows, Some(&summary)).unwrap();
            assert!(!bytes.is_empty(), "{format:?} produced nothing");
        }
    }
}
