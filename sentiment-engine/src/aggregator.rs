use crate::lexicon::{Lexicon, TopicDefinition};
use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use pulse_core::{
    DashboardSnapshot, Post, SentimentBucket, SentimentLabel, TopicResult, TrendPoint,
};
use std::sync::Arc;
use tracing::debug;

const WEEKDAYS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "Mon"),
    (Weekday::Tue, "Tue"),
    (Weekday::Wed, "Wed"),
    (Weekday::Thu, "Thu"),
    (Weekday::Fri, "Fri"),
    (Weekday::Sat, "Sat"),
    (Weekday::Sun, "Sun"),
];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Result for a topic no post mentions.
const DEFAULT_TOPIC_PERCENTAGE: u8 = 50;
/// Bound on the day-over-day change reported per topic.
const MAX_TOPIC_CHANGE: i64 = 5;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LabelCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl LabelCounts {
    pub fn tally<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Self {
        let mut counts = Self::default();
        for post in posts {
            match post.label() {
                SentimentLabel::Positive => counts.positive += 1,
                SentimentLabel::Negative => counts.negative += 1,
                SentimentLabel::Neutral => counts.neutral += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Percentage of `count` in this tally; an empty tally divides by 1.
    pub fn percent(&self, count: usize) -> f64 {
        count as f64 * 100.0 / self.total().max(1) as f64
    }

    /// Positive vs negative majority; ties and neutral-only sets are neutral.
    pub fn majority(&self) -> SentimentLabel {
        if self.positive > self.negative {
            SentimentLabel::Positive
        } else if self.negative > self.positive {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    fn trend_point(&self, date: &str) -> TrendPoint {
        TrendPoint {
            date: date.to_string(),
            positive: self.percent(self.positive),
            negative: self.percent(self.negative),
            neutral: self.percent(self.neutral),
        }
    }
}

fn average_score<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Option<f64> {
    let (sum, count) = posts
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), post| {
            (sum + post.score as f64, count + 1)
        });
    (count > 0).then(|| sum / count as f64)
}

pub fn overall_sentiment(posts: &[Post]) -> [SentimentBucket; 3] {
    let counts = LabelCounts::tally(posts);
    [
        SentimentBucket {
            name: SentimentLabel::Positive,
            value: counts.percent(counts.positive),
        },
        SentimentBucket {
            name: SentimentLabel::Negative,
            value: counts.percent(counts.negative),
        },
        SentimentBucket {
            name: SentimentLabel::Neutral,
            value: counts.percent(counts.neutral),
        },
    ]
}

/// Label percentages per UTC weekday, Monday first.
pub fn weekly_trend(posts: &[Post]) -> [TrendPoint; 7] {
    WEEKDAYS.map(|(weekday, name)| {
        LabelCounts::tally(posts.iter().filter(|p| p.created_at.weekday() == weekday))
            .trend_point(name)
    })
}

/// Label percentages per UTC calendar month, January first. Posts from
/// different years share a month bucket.
pub fn monthly_trend(posts: &[Post]) -> [TrendPoint; 12] {
    let mut index = 0_u32;
    MONTHS.map(|name| {
        let month0 = index;
        index += 1;
        LabelCounts::tally(posts.iter().filter(|p| p.created_at.month0() == month0))
            .trend_point(name)
    })
}

/// Builds dashboard views from a post collection.
#[derive(Debug, Clone)]
pub struct Aggregator {
    lexicon: Arc<Lexicon>,
}

impl Aggregator {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// `now` anchors the 24 hour window used for topic change.
    pub fn aggregate(&self, posts: &[Post], now: DateTime<Utc>) -> DashboardSnapshot {
        debug!("Aggregating {} posts", posts.len());
        DashboardSnapshot {
            overall_sentiment: overall_sentiment(posts),
            sentiment_trend: weekly_trend(posts),
            topic_data: self.topic_breakdown(posts, now),
        }
    }

    pub fn topic_breakdown(&self, posts: &[Post], now: DateTime<Utc>) -> Vec<TopicResult> {
        self.lexicon
            .topics
            .iter()
            .map(|topic| topic_result(topic, posts, now))
            .collect()
    }
}

fn topic_result(topic: &TopicDefinition, posts: &[Post], now: DateTime<Utc>) -> TopicResult {
    let matching: Vec<&Post> = posts
        .iter()
        .filter(|post| post.mentions_any(&topic.keywords))
        .collect();

    let Some(avg) = average_score(matching.iter().copied()) else {
        return TopicResult {
            topic: topic.name.clone(),
            sentiment: SentimentLabel::Neutral,
            percentage: DEFAULT_TOPIC_PERCENTAGE,
            change: 0,
        };
    };

    // -1000 maps to 0 and +1000 maps to 100.
    let percentage = ((avg + 1000.0) / 2000.0 * 100.0).clamp(0.0, 100.0).round() as u8;

    TopicResult {
        topic: topic.name.clone(),
        sentiment: LabelCounts::tally(matching.iter().copied()).majority(),
        percentage,
        change: day_over_day_change(&matching, now),
    }
}

/// Relative change of the average score of the last 24 hours against older
/// posts, in percent, clamped to [-5, 5]. Zero when either side is empty.
fn day_over_day_change(posts: &[&Post], now: DateTime<Utc>) -> i8 {
    let cutoff = now - Duration::hours(24);
    let (recent, older): (Vec<&Post>, Vec<&Post>) =
        posts.iter().copied().partition(|post| post.created_at > cutoff);

    match (average_score(recent), average_score(older)) {
        (Some(recent_avg), Some(older_avg)) => {
            let base = if older_avg == 0.0 { 1.0 } else { older_avg.abs() };
            let change = ((recent_avg - older_avg) / base * 100.0).round() as i64;
            change.clamp(-MAX_TOPIC_CHANGE, MAX_TOPIC_CHANGE) as i8
        }
        _ => 0,
    }
}
