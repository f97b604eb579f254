mod common;

use common::{now, post, ten_post_fixture};
use pulse_core::SentimentLabel;
use sentiment_engine::{overall_sentiment, weekly_trend, Aggregator, Lexicon, TopicDefinition};
use std::sync::Arc;

fn aggregator() -> Aggregator {
    Aggregator::new(Arc::new(Lexicon::default()))
}

#[test]
fn test_ten_post_overall_distribution() {
    let posts = ten_post_fixture();
    let snapshot = aggregator().aggregate(&posts, now());

    // 1500, 1200, 2000 are positive; -150, -200, -300 negative; the rest neutral.
    let values: Vec<(SentimentLabel, f64)> = snapshot
        .overall_sentiment
        .iter()
        .map(|b| (b.name, b.value))
        .collect();
    assert_eq!(
        values,
        vec![
            (SentimentLabel::Positive, 30.0),
            (SentimentLabel::Negative, 30.0),
            (SentimentLabel::Neutral, 40.0),
        ]
    );
}

#[test]
fn test_economy_topic_uses_only_matching_posts() {
    let posts = ten_post_fixture();
    let snapshot = aggregator().aggregate(&posts, now());

    assert_eq!(snapshot.topic_data.len(), 6);
    let economy = &snapshot.topic_data[0];
    assert_eq!(economy.topic, "Economy");
    // Mean of 1500, -150 and 800 is 716.7, mapped to 86.
    assert_eq!(economy.percentage, 86);
    // One positive, one negative, one neutral.
    assert_eq!(economy.sentiment, SentimentLabel::Neutral);
    // Recent mean 1500 against older mean 325 saturates the bound.
    assert_eq!(economy.change, 5);

    for topic in &snapshot.topic_data[1..] {
        assert_eq!(topic.sentiment, SentimentLabel::Neutral, "{}", topic.topic);
        assert_eq!(topic.percentage, 50, "{}", topic.topic);
        assert_eq!(topic.change, 0, "{}", topic.topic);
    }
}

#[test]
fn test_overall_percentages_sum_to_hundred() {
    let posts = ten_post_fixture();
    for len in 1..=posts.len() {
        let buckets = overall_sentiment(&posts[..len]);
        let sum: f64 = buckets.iter().map(|b| b.value).sum();
        assert!((sum - 100.0).abs() < 1e-9, "len {} sums to {}", len, sum);
        assert!(buckets.iter().all(|b| (0.0..=100.0).contains(&b.value)));
    }
}

#[test]
fn test_weekly_trend_partitions_each_populated_day() {
    let posts = ten_post_fixture();
    let trend = weekly_trend(&posts);

    for point in &trend {
        for value in [point.positive, point.negative, point.neutral] {
            assert!((0.0..=100.0).contains(&value));
        }
        let sum = point.positive + point.negative + point.neutral;
        assert!(sum == 0.0 || (sum - 100.0).abs() < 1e-9, "{} sums to {}", point.date, sum);
    }

    // The recent post falls on Wednesday, the rest three days earlier on Sunday.
    assert_eq!(trend[2].date, "Wed");
    assert_eq!(trend[2].positive, 100.0);
    assert_eq!(trend[6].date, "Sun");
    assert!((trend[6].neutral - 400.0 / 9.0).abs() < 1e-9);
    assert_eq!(trend[0].positive + trend[0].negative + trend[0].neutral, 0.0);
}

#[test]
fn test_neutral_band_boundaries_in_trend() {
    let day = now();
    let posts = vec![
        post("a", "x", None, 1000, day),
        post("b", "x", None, -100, day),
        post("c", "x", None, 1001, day),
        post("d", "x", None, -101, day),
    ];
    let trend = weekly_trend(&posts);
    let wednesday = &trend[2];
    assert_eq!(wednesday.neutral, 50.0);
    assert_eq!(wednesday.positive, 25.0);
    assert_eq!(wednesday.negative, 25.0);
}

#[test]
fn test_custom_taxonomy_is_used() {
    let lexicon = Lexicon {
        topics: vec![TopicDefinition {
            name: "Courts".to_string(),
            keywords: vec!["court".to_string()],
        }],
        ..Lexicon::default()
    };
    let aggregator = Aggregator::new(Arc::new(lexicon));
    let snapshot = aggregator.aggregate(&ten_post_fixture(), now());

    assert_eq!(snapshot.topic_data.len(), 1);
    let courts = &snapshot.topic_data[0];
    assert_eq!(courts.topic, "Courts");
    assert_eq!(courts.sentiment, SentimentLabel::Negative);
    // -300 maps to 35.
    assert_eq!(courts.percentage, 35);
}

#[test]
fn test_empty_input_degrades_to_zeroes() {
    let snapshot = aggregator().aggregate(&[], now());
    assert!(snapshot.overall_sentiment.iter().all(|b| b.value == 0.0));
    assert!(snapshot
        .sentiment_trend
        .iter()
        .all(|p| p.positive == 0.0 && p.negative == 0.0 && p.neutral == 0.0));
    assert!(snapshot
        .topic_data
        .iter()
        .all(|t| t.percentage == 50 && t.change == 0));
}

#[test]
fn test_snapshot_serializes_labels_lowercase() {
    let snapshot = aggregator().aggregate(&ten_post_fixture(), now());
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["overall_sentiment"][0]["name"], "positive");
    assert_eq!(json["sentiment_trend"][0]["date"], "Mon");
    assert_eq!(json["topic_data"][0]["topic"], "Economy");
}
