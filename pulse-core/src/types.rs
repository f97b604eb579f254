use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores strictly above this are positive.
pub const POSITIVE_SCORE_THRESHOLD: i64 = 1000;
/// Scores strictly below this are negative.
pub const NEGATIVE_SCORE_THRESHOLD: i64 = -100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: Option<String>,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_score(self.score)
    }

    /// Lowercased title and body, joined by a space.
    pub fn searchable_text(&self) -> String {
        match &self.body {
            Some(body) => format!("{} {}", self.title, body).to_lowercase(),
            None => self.title.to_lowercase(),
        }
    }

    /// True when any needle (expected lowercase) occurs in the title or body.
    pub fn mentions_any<S: AsRef<str>>(&self, needles: &[S]) -> bool {
        let title = self.title.to_lowercase();
        let body = self.body.as_deref().map(str::to_lowercase);
        needles.iter().any(|needle| {
            let needle = needle.as_ref();
            title.contains(needle) || body.as_deref().is_some_and(|b| b.contains(needle))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    pub fn from_score(score: i64) -> Self {
        Self::from_average(score as f64)
    }

    /// Same thresholds as [`SentimentLabel::from_score`], applied to an averaged score.
    pub fn from_average(score: f64) -> Self {
        if score > POSITIVE_SCORE_THRESHOLD as f64 {
            SentimentLabel::Positive
        } else if score < NEGATIVE_SCORE_THRESHOLD as f64 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    /// Signed unit signal: +1, -1 or 0.
    pub fn signal(&self) -> i8 {
        match self {
            SentimentLabel::Positive => 1,
            SentimentLabel::Negative => -1,
            SentimentLabel::Neutral => 0,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentBucket {
    pub name: SentimentLabel,
    pub value: f64,
}

/// Label percentages for one calendar bucket. The three values are computed
/// independently against the bucket size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicResult {
    pub topic: String,
    pub sentiment: SentimentLabel,
    pub percentage: u8,
    pub change: i8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub overall_sentiment: [SentimentBucket; 3],
    pub sentiment_trend: [TrendPoint; 7],
    pub topic_data: Vec<TopicResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub text: String,
    pub source: String,
    pub date: DateTime<Utc>,
    pub sentiment: SentimentLabel,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectScore {
    pub topic: String,
    pub sentiment: SentimentLabel,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectResult {
    pub sentiment: SentimentLabel,
    pub score: f64,
    pub aspects: Vec<AspectScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Hour => "hour",
            TimeRange::Day => "day",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
            TimeRange::All => "all",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Hot,
    Top(TimeRange),
}

impl Listing {
    pub fn path_segment(&self) -> &'static str {
        match self {
            Listing::Hot => "hot",
            Listing::Top(_) => "top",
        }
    }

    pub fn time_range(&self) -> Option<TimeRange> {
        match self {
            Listing::Hot => None,
            Listing::Top(range) => Some(*range),
        }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Hot => f.write_str("hot"),
            Listing::Top(range) => write!(f, "top/{}", range.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub channel: String,
    pub listing: Listing,
    pub limit: u32,
}

impl FeedRequest {
    pub fn hot(channel: impl Into<String>, limit: u32) -> Self {
        Self {
            channel: channel.into(),
            listing: Listing::Hot,
            limit,
        }
    }

    pub fn top(channel: impl Into<String>, range: TimeRange, limit: u32) -> Self {
        Self {
            channel: channel.into(),
            listing: Listing::Top(range),
            limit,
        }
    }
}
