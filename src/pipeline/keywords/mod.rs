//! Keyword extraction.
//!
//! Statistical single-word ranking first; any failure there falls back to a
//! plain frequency count. Callers never see an error.

pub mod stopwords;
mod frequency;
mod statistical;

use thiserror::Error;

pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_LANGUAGE: &str = "en";

/// Failures of the statistical path. Always absorbed by the fallback.
#[derive(Error, Debug)]
pub(crate) enum KeywordError {
    #[error("Unsupported keyword language: {0}")]
    UnsupportedLanguage(String),

    #[error("Non-finite score for term {0:?}")]
    Degenerate(String),
}

/// Extract up to `top_n` keywords from `text`, most relevant first.
pub fn extract_keywords(text: &str, top_n: usize, language: &str) -> Vec<String> {
    if top_n == 0 || text.trim().is_empty() {
        return Vec::new();
    }

    match statistical::extract(text, top_n, language) {
        Ok(keywords) => keywords,
        Err(e) => {
            tracing::debug!(error = %e, "Statistical keyword extraction failed, using frequency fallback");
            frequency::extract(text, top_n)
        }
    }
}

/// [`extract_keywords`] with the default count and language.
pub fn extract_default_keywords(text: &str) -> Vec<String> {
    extract_keywords(text, DEFAULT_TOP_N, DEFAULT_LANGUAGE)
}
