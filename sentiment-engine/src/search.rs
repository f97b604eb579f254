use pulse_core::{Post, SearchResult, SentimentLabel};

pub const SEARCH_SOURCE: &str = "Reddit";

/// Fixed confidence reported per label.
pub fn label_confidence(label: SentimentLabel) -> f64 {
    match label {
        SentimentLabel::Positive => 0.8,
        SentimentLabel::Negative => 0.2,
        SentimentLabel::Neutral => 0.5,
    }
}

/// Posts whose title or body contains `query` (case-insensitive), optionally
/// restricted to one label. An empty query matches every post.
pub fn search(posts: &[Post], query: &str, filter: Option<SentimentLabel>) -> Vec<SearchResult> {
    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| post.mentions_any(&[needle.as_str()]))
        .filter(|post| filter.map_or(true, |wanted| post.label() == wanted))
        .map(to_result)
        .collect()
}

fn to_result(post: &Post) -> SearchResult {
    let sentiment = post.label();
    SearchResult {
        id: post.id.clone(),
        text: post.title.clone(),
        source: SEARCH_SOURCE.to_string(),
        date: post.created_at,
        sentiment,
        score: label_confidence(sentiment),
    }
}
