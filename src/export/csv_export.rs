use serde::Serialize;

use super::ExportError;
use crate::pipeline::normalize::NormalizedRow;

#[derive(Serialize)]
struct CsvRecord<'a> {
    text: &'a str,
    sentiment: &'a str,
    confidence: String,
    keywords: &'a str,
}

/// Header `text,sentiment,confidence,keywords`; failed rows leave the last two
/// cells empty.
pub fn rows_to_csv(rows: &[NormalizedRow]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for row in rows {
        writer.serialize(CsvRecord {
            text: &row.text,
            sentiment: row.sentiment_label.as_str(),
            confidence: row
                .confidence_percent
                .map(|c| format!("{c:.2}"))
                .unwrap_or_default(),
            keywords: row.keywords_joined.as_deref().unwrap_or(""),
        })?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}
