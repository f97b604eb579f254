mod common;

use common::five_post_fixture;
use pulse_core::SentimentLabel;
use sentiment_engine::search;

#[test]
fn test_filter_only_returns_matching_label() {
    let posts = five_post_fixture();
    for query in ["", "the", "tax", "BORDER", "nothing matches this"] {
        for label in SentimentLabel::ALL {
            let results = search(&posts, query, Some(label));
            assert!(
                results.iter().all(|r| r.sentiment == label),
                "query {:?} filter {:?}",
                query,
                label
            );
        }
    }
}

#[test]
fn test_positive_filter_on_fixture() {
    let posts = five_post_fixture();
    let results = search(&posts, "", Some(SentimentLabel::Positive));
    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    // 2400 and 1001 are above the threshold.
    assert_eq!(ids, vec!["s1", "s4"]);
    assert!(results.iter().all(|r| r.score == 0.8));
}

#[test]
fn test_query_matches_body_text() {
    let posts = five_post_fixture();
    let results = search(&posts, "tax", None);
    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["s1", "s2", "s3"]);

    let scores: Vec<f64> = results.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![0.8, 0.2, 0.5]);

    let results = search(&posts, "disaster", Some(SentimentLabel::Negative));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "s2");
    assert_eq!(results[0].text, "The tax bill faces opposition");
}

#[test]
fn test_boundary_score_is_neutral() {
    let posts = five_post_fixture();
    let results = search(&posts, "daily", None);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].sentiment, SentimentLabel::Neutral);
    assert_eq!(results[0].source, "Reddit");
}
