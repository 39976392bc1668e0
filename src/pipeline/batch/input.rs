/// Split plain-text content into batch items: one per non-empty trimmed line.
pub fn texts_from_plain_text(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
