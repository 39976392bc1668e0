use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::stopwords::is_stopword;

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));

/// Deterministic frequency ranking: most frequent first, ties in first-seen order.
pub(super) fn extract(text: &str, top_n: usize) -> Vec<String> {
    let cleaned = PUNCTUATION.replace_all(text, "").to_lowercase();

    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in cleaned.split_whitespace() {
        if token.chars().count() <= 2 || is_stopword(token) {
            continue;
        }
        match index.get(token) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(token.to_string(), counts.len());
                counts.push((token.to_string(), 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(top_n).map(|(token, _)| token).collect()
}
