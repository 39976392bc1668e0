use super::ExportError;
use crate::pipeline::normalize::NormalizedRow;

/// Pretty-printed array of row objects.
pub fn rows_to_json(rows: &[NormalizedRow]) -> Result<Vec<u8>, ExportError> {
    Ok(serde_json::to_vec_pretty(rows)?)
}

/// One compact row object per line.
pub fn rows_to_json_lines(rows: &[NormalizedRow]) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::new();
    for row in rows {
        serde_json::to_writer(&mut out, row)?;
        out.push(b'\n');
    }
    Ok(out)
}
