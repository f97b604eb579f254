/// Lowercase whitespace-separated tokens. Punctuation stays attached, so
/// `"tax,"` is a four-character token.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Distinct tokens longer than three characters, in first-seen order.
pub fn significant_terms(tokens: &[String]) -> Vec<&str> {
    let mut terms: Vec<&str> = Vec::new();
    for token in tokens {
        if token.chars().count() > 3 && !terms.contains(&token.as_str()) {
            terms.push(token.as_str());
        }
    }
    terms
}

/// Number of tokens equal to a word in `vocabulary`.
pub fn count_matches(tokens: &[String], vocabulary: &[String]) -> usize {
    tokens.iter().filter(|token| vocabulary.contains(token)).count()
}
