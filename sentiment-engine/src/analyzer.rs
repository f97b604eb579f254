use crate::lexicon::{AspectDefinition, Lexicon};
use crate::text::{count_matches, significant_terms, tokenize};
use pulse_core::{AspectResult, AspectScore, Post, SentimentLabel};
use std::sync::Arc;
use tracing::debug;

/// Shared significant terms needed for a post to count as similar.
pub const MIN_SHARED_TERMS: usize = 2;

const NEUTRAL_SCORE: f64 = 0.5;
const MAX_OVERALL_SCORE: f64 = 0.9;
const MAX_ASPECT_SCORE: f64 = 0.95;
/// Combined aspect signal beyond which an aspect is polarized.
const ASPECT_SIGNAL_THRESHOLD: f64 = 0.3;
const POST_SIGNAL_WEIGHT: f64 = 2.0;
const TEXT_SIGNAL_WEIGHT: f64 = 1.0;

/// Scores a free-text statement overall and per aspect.
#[derive(Debug, Clone)]
pub struct AspectAnalyzer {
    lexicon: Arc<Lexicon>,
}

impl AspectAnalyzer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Posts sharing at least [`MIN_SHARED_TERMS`] distinct significant terms
    /// with `text`, matched as substrings of title and body.
    pub fn similar_posts<'a>(&self, text: &str, corpus: &'a [Post]) -> Vec<&'a Post> {
        let tokens = tokenize(text);
        similar_to(&significant_terms(&tokens), corpus)
    }

    pub fn analyze(&self, text: &str, corpus: &[Post]) -> AspectResult {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return AspectResult {
                sentiment: SentimentLabel::Neutral,
                score: NEUTRAL_SCORE,
                aspects: self
                    .lexicon
                    .aspects
                    .iter()
                    .map(neutral_aspect)
                    .collect(),
            };
        }

        let similar = similar_to(&significant_terms(&tokens), corpus);
        debug!(
            "Analyzing statement with {} tokens against {} similar posts",
            tokens.len(),
            similar.len()
        );

        let (sentiment, score) = if similar.is_empty() {
            self.keyword_sentiment(&tokens)
        } else {
            score_from_average(average_score(&similar))
        };

        let lowered = text.to_lowercase();
        let aspects = self
            .lexicon
            .aspects
            .iter()
            .map(|aspect| score_aspect(aspect, &lowered, &tokens, &similar))
            .collect();

        AspectResult {
            sentiment,
            score,
            aspects,
        }
    }

    /// Majority of general positive vs negative words in the statement.
    fn keyword_sentiment(&self, tokens: &[String]) -> (SentimentLabel, f64) {
        let positive = count_matches(tokens, &self.lexicon.positive_words);
        let negative = count_matches(tokens, &self.lexicon.negative_words);

        let sentiment = majority(positive, negative);
        let imbalance = positive.abs_diff(negative) as f64;
        let score = ((imbalance + 1.0) / (tokens.len() as f64 + 1.0)).max(NEUTRAL_SCORE);
        (sentiment, score)
    }
}

fn similar_to<'a>(terms: &[&str], corpus: &'a [Post]) -> Vec<&'a Post> {
    if terms.len() < MIN_SHARED_TERMS {
        return Vec::new();
    }
    corpus
        .iter()
        .filter(|post| {
            let haystack = post.searchable_text();
            terms.iter().filter(|term| haystack.contains(**term)).count() >= MIN_SHARED_TERMS
        })
        .collect()
}

fn average_score(posts: &[&Post]) -> f64 {
    posts.iter().map(|p| p.score as f64).sum::<f64>() / posts.len().max(1) as f64
}

fn majority(positive: usize, negative: usize) -> SentimentLabel {
    if positive > negative {
        SentimentLabel::Positive
    } else if negative > positive {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Label an average post score and scale confidence within its band.
fn score_from_average(avg: f64) -> (SentimentLabel, f64) {
    let label = SentimentLabel::from_average(avg);
    let score = match label {
        SentimentLabel::Positive => (avg - 1000.0) / 9000.0 + 0.6,
        SentimentLabel::Negative => (avg + 100.0).abs() / 900.0 + 0.6,
        SentimentLabel::Neutral => NEUTRAL_SCORE + avg.abs() / 2000.0,
    };
    (label, score.min(MAX_OVERALL_SCORE))
}

fn neutral_aspect(aspect: &AspectDefinition) -> AspectScore {
    AspectScore {
        topic: aspect.name.clone(),
        sentiment: SentimentLabel::Neutral,
        score: NEUTRAL_SCORE,
    }
}

fn score_aspect(
    aspect: &AspectDefinition,
    lowered_text: &str,
    tokens: &[String],
    similar: &[&Post],
) -> AspectScore {
    if !aspect.keywords.iter().any(|k| lowered_text.contains(k.as_str())) {
        return neutral_aspect(aspect);
    }

    let text_signal = majority(
        count_matches(tokens, &aspect.positive_words),
        count_matches(tokens, &aspect.negative_words),
    )
    .signal() as f64;

    let relevant: Vec<&Post> = similar
        .iter()
        .copied()
        .filter(|post| post.mentions_any(&aspect.keywords))
        .collect();
    let post_signal = if relevant.is_empty() {
        0.0
    } else {
        SentimentLabel::from_average(average_score(&relevant)).signal() as f64
    };

    let combined = (text_signal * TEXT_SIGNAL_WEIGHT + post_signal * POST_SIGNAL_WEIGHT)
        / (TEXT_SIGNAL_WEIGHT + POST_SIGNAL_WEIGHT);

    let (sentiment, score) = if combined > ASPECT_SIGNAL_THRESHOLD {
        (SentimentLabel::Positive, 0.5 + combined * 0.4)
    } else if combined < -ASPECT_SIGNAL_THRESHOLD {
        (SentimentLabel::Negative, 0.5 + combined.abs() * 0.4)
    } else {
        (SentimentLabel::Neutral, 0.5 + combined.abs() * 0.2)
    };

    AspectScore {
        topic: aspect.name.clone(),
        sentiment,
        score: score.min(MAX_ASPECT_SCORE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_from_average_bands() {
        let (label, score) = score_from_average(1000.0);
        assert_eq!(label, SentimentLabel::Neutral);
        assert!((score - 0.9).abs() < 1e-9);

        let (label, score) = score_from_average(5500.0);
        assert_eq!(label, SentimentLabel::Positive);
        assert!((score - 0.9).abs() < 1e-9);

        let (label, score) = score_from_average(1900.0);
        assert_eq!(label, SentimentLabel::Positive);
        assert!((score - 0.7).abs() < 1e-9);

        let (label, score) = score_from_average(-190.0);
        assert_eq!(label, SentimentLabel::Negative);
        assert!((score - 0.7).abs() < 1e-9);

        let (label, score) = score_from_average(200.0);
        assert_eq!(label, SentimentLabel::Neutral);
        assert!((score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_majority_ties_are_neutral() {
        assert_eq!(majority(2, 2), SentimentLabel::Neutral);
        assert_eq!(majority(0, 0), SentimentLabel::Neutral);
        assert_eq!(majority(3, 1), SentimentLabel::Positive);
        assert_eq!(majority(0, 1), SentimentLabel::Negative);
    }

    #[test]
    fn test_single_significant_term_never_matches() {
        let terms = vec!["economy"];
        assert!(similar_to(&terms, &[]).is_empty());
    }
}
