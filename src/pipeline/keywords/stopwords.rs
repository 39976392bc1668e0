use std::collections::HashSet;
use std::sync::LazyLock;

/// Fixed English stop-word list shared by both extraction paths.
static ENGLISH_STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
        "any", "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can", "cannot", "could", "did", "didn't", "do", "does",
        "doesn't", "doing", "don't", "down", "during", "each", "even", "ever", "every", "few",
        "for", "from", "further", "get", "got", "had", "has", "have", "having", "he", "her",
        "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in",
        "into", "is", "isn't", "it", "it's", "its", "itself", "just", "let", "like", "may", "me",
        "might", "more", "most", "much", "must", "my", "myself", "never", "no", "nor", "not",
        "now", "of", "off", "on", "once", "one", "only", "or", "other", "ought", "our", "ours",
        "ourselves", "out", "over", "own", "really", "same", "shall", "she", "should", "so",
        "some", "still", "such", "than", "that", "the", "their", "theirs", "them", "themselves",
        "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
        "until", "up", "upon", "us", "very", "was", "wasn't", "we", "were", "weren't", "what",
        "when", "where", "which", "while", "who", "whom", "why", "will", "with", "won't",
        "would", "yet", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Case-insensitive stop-word check.
pub fn is_stopword(word: &str) -> bool {
    if ENGLISH_STOP_WORDS.contains(word) {
        return true;
    }
    let lower = word.to_lowercase();
    ENGLISH_STOP_WORDS.contains(lower.as_str())
}
