//! Single-word statistical keyword scoring (YAKE-style).
//!
//! Each candidate term gets five features computed from the text alone:
//! casing, sentence position, normalized frequency, context relatedness and
//! sentence spread. They are combined into one score where lower means more
//! relevant.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use super::stopwords::is_stopword;
use super::KeywordError;

const SUPPORTED_LANGUAGES: &[&str] = &["en"];

static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?;]+(?:\s+|$)|\n+").expect("sentence pattern is valid")
});

static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’-][\p{L}\p{N}]+)*").expect("word pattern is valid")
});

#[derive(Default)]
struct TermStats {
    first_seen: usize,
    tf: usize,
    tf_capitalized: usize,
    tf_acronym: usize,
    sentence_ids: Vec<usize>,
    left: Vec<String>,
    right: Vec<String>,
}

pub(super) fn extract(text: &str, top_n: usize, language: &str) -> Result<Vec<String>, KeywordError> {
    if !SUPPORTED_LANGUAGES
        .iter()
        .any(|l| l.eq_ignore_ascii_case(language.trim()))
    {
        return Err(KeywordError::UnsupportedLanguage(language.to_string()));
    }

    let sentences: Vec<Vec<&str>> = SENTENCE_BREAK
        .split(text)
        .map(|s| WORD.find_iter(s).map(|m| m.as_str()).collect::<Vec<_>>())
        .filter(|tokens| !tokens.is_empty())
        .collect();

    let mut terms: HashMap<String, TermStats> = HashMap::new();
    let mut order = 0usize;

    for (sentence_id, tokens) in sentences.iter().enumerate() {
        for (pos, token) in tokens.iter().enumerate() {
            order += 1;
            let key = token.to_lowercase();
            if !is_candidate(&key) {
                continue;
            }

            let stats = terms.entry(key).or_insert_with(|| TermStats {
                first_seen: order,
                ..TermStats::default()
            });
            stats.tf += 1;
            if is_acronym(token) {
                stats.tf_acronym += 1;
            } else if pos > 0 && starts_uppercase(token) {
                stats.tf_capitalized += 1;
            }
            stats.sentence_ids.push(sentence_id);
            if pos > 0 {
                stats.left.push(tokens[pos - 1].to_lowercase());
            }
            if let Some(next) = tokens.get(pos + 1) {
                stats.right.push(next.to_lowercase());
            }
        }
    }

    if terms.is_empty() {
        return Ok(Vec::new());
    }

    let tfs: Vec<f64> = terms.values().map(|t| t.tf as f64).collect();
    let n = tfs.len() as f64;
    let mean_tf = tfs.iter().sum::<f64>() / n;
    let std_tf = (tfs.iter().map(|tf| (tf - mean_tf).powi(2)).sum::<f64>() / n).sqrt();
    let max_tf = tfs.iter().copied().fold(0.0, f64::max);
    let sentence_count = sentences.len() as f64;

    let mut scored: Vec<(f64, usize, String)> = Vec::with_capacity(terms.len());
    for (term, stats) in terms {
        let score = term_score(&stats, mean_tf, std_tf, max_tf, sentence_count);
        if !score.is_finite() {
            return Err(KeywordError::Degenerate(term));
        }
        scored.push((score, stats.first_seen, term));
    }

    scored.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    Ok(scored.into_iter().take(top_n).map(|(_, _, term)| term).collect())
}

fn term_score(stats: &TermStats, mean_tf: f64, std_tf: f64, max_tf: f64, sentence_count: f64) -> f64 {
    let tf = stats.tf as f64;

    let casing = stats.tf_acronym.max(stats.tf_capitalized) as f64 / (1.0 + tf.ln());
    let position = (3.0 + median(&stats.sentence_ids)).ln().ln();
    let frequency = tf / (mean_tf + std_tf);
    let relatedness = 1.0 + (dispersion(&stats.left) + dispersion(&stats.right)) * (tf / max_tf);
    let distinct_sentences = stats.sentence_ids.iter().collect::<HashSet<_>>().len() as f64;
    let spread = distinct_sentences / sentence_count;

    (relatedness * position) / (casing + frequency / relatedness + spread / relatedness)
}

/// Sentence ids are pushed in reading order, so the slice is already sorted.
fn median(sorted_ids: &[usize]) -> f64 {
    let len = sorted_ids.len();
    if len == 0 {
        return 0.0;
    }
    if len % 2 == 1 {
        sorted_ids[len / 2] as f64
    } else {
        (sorted_ids[len / 2 - 1] + sorted_ids[len / 2]) as f64 / 2.0
    }
}

/// Share of distinct neighbours among all neighbour occurrences.
fn dispersion(neighbours: &[String]) -> f64 {
    if neighbours.is_empty() {
        return 0.0;
    }
    let distinct = neighbours.iter().collect::<HashSet<_>>().len();
    distinct as f64 / neighbours.len() as f64
}

fn is_candidate(lower: &str) -> bool {
    lower.chars().count() > 2
        && !is_stopword(lower)
        && lower.chars().any(|c| c.is_alphabetic())
}

fn is_acronym(token: &str) -> bool {
    token.chars().count() > 1
        && token.chars().any(|c| c.is_alphabetic())
        && token.chars().all(|c| !c.is_alphabetic() || c.is_uppercase())
}

fn starts_uppercase(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_edge_terms_of_a_single_sentence_first() {
        let text = "Artificial intelligence is transforming the technology industry rapidly.";
        let keywords = extract(text, 2, "en").unwrap();
        assert_eq!(keywords, vec!["artificial", "rapidly"]);
    }

    #[test]
    fn respects_top_n() {
        let text = "Artificial intelligence is transforming the technology industry rapidly.";
        let keywords = extract(text, 3, "en").unwrap();
        assert_eq!(keywords.len(), 3);
        assert!(keywords.iter().all(|k| !k.is_empty()));
    }

    #[test]
    fn drops_stop_words_short_tokens_and_numbers() {
        let keywords = extract("It is an ok day in 2024 and we go.", 10, "en").unwrap();
        assert_eq!(keywords, vec!["day"]);
    }

    #[test]
    fn terms_are_unique_and_lowercase() {
        let keywords = extract("Great battery. GREAT screen. great price.", 10, "en").unwrap();
        let unique: HashSet<_> = keywords.iter().collect();
        assert_eq!(unique.len(), keywords.len());
        assert!(keywords.contains(&"great".to_string()));
        assert!(keywords.iter().all(|k| k.chars().all(|c| !c.is_uppercase())));
    }

    #[test]
    fn earlier_sentences_score_better() {
        let text = "Refund delayed. Support never answered my ticket about shipping.";
        let keywords = extract(text, 1, "en").unwrap();
        assert_eq!(keywords, vec!["refund"]);
    }

    #[test]
    fn unsupported_language_is_an_error() {
        let err = extract("Der Akku ist großartig.", 5, "de").unwrap_err();
        assert!(matches!(err, KeywordError::UnsupportedLanguage(lang) if lang == "de"));
    }

    #[test]
    fn punctuation_only_yields_nothing() {
        assert!(extract("?!... ;;", 5, "en").unwrap().is_empty());
    }

    #[test]
    fn median_handles_even_and_odd() {
        assert_eq!(median(&[0, 1, 2]), 1.0);
        assert_eq!(median(&[0, 1, 2, 3]), 1.5);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn acronyms_are_detected() {
        assert!(is_acronym("NASA"));
        assert!(is_acronym("COVID-19"));
        assert!(!is_acronym("Nasa"));
        assert!(!is_acronym("I"));
    }
}
