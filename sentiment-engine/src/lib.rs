pub mod aggregator;
pub mod analyzer;
pub mod lexicon;
pub mod search;
pub mod service;
pub mod text;

pub use aggregator::{monthly_trend, overall_sentiment, weekly_trend, Aggregator, LabelCounts};
pub use analyzer::AspectAnalyzer;
pub use lexicon::{AspectDefinition, Lexicon, TopicDefinition};
pub use search::{label_confidence, search, SEARCH_SOURCE};
pub use service::{SentimentService, HISTORY_LIMIT};
