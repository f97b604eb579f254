use crate::aggregator::{monthly_trend, Aggregator};
use crate::analyzer::AspectAnalyzer;
use crate::lexicon::Lexicon;
use crate::search::search;
use chrono::{DateTime, Utc};
use pulse_core::{
    AspectResult, DashboardSnapshot, FeedConfig, FeedRequest, NetworkError, Post, PostSource,
    SearchResult, SentimentLabel, TimeRange, TrendPoint,
};
use std::sync::Arc;
use tracing::info;

/// Page size for the yearly top listing behind the monthly trend.
pub const HISTORY_LIMIT: u32 = 100;

/// One fetch, then one transform, per operation. Fetch errors are returned
/// unchanged.
pub struct SentimentService<S> {
    source: S,
    feed: FeedConfig,
    aggregator: Aggregator,
    analyzer: AspectAnalyzer,
}

impl<S: PostSource> SentimentService<S> {
    pub fn new(source: S, lexicon: Arc<Lexicon>, feed: FeedConfig) -> Self {
        Self {
            source,
            feed,
            aggregator: Aggregator::new(lexicon.clone()),
            analyzer: AspectAnalyzer::new(lexicon),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn feed(&self) -> &FeedConfig {
        &self.feed
    }

    /// Hot posts for the configured channel.
    pub async fn fetch_corpus(&self) -> Result<Vec<Post>, NetworkError> {
        let request = FeedRequest::hot(self.feed.channel.clone(), self.feed.limit);
        self.source.fetch(&request).await
    }

    pub async fn dashboard(&self) -> Result<DashboardSnapshot, NetworkError> {
        self.dashboard_at(Utc::now()).await
    }

    pub async fn dashboard_at(&self, now: DateTime<Utc>) -> Result<DashboardSnapshot, NetworkError> {
        let posts = self.fetch_corpus().await?;
        info!("Building dashboard for r/{} from {} posts", self.feed.channel, posts.len());
        Ok(self.aggregator.aggregate(&posts, now))
    }

    /// Monthly label percentages over the channel's top posts of the past year.
    pub async fn historical_trend(&self) -> Result<[TrendPoint; 12], NetworkError> {
        let request = FeedRequest::top(self.feed.channel.clone(), TimeRange::Year, HISTORY_LIMIT);
        let posts = self.source.fetch(&request).await?;
        info!("Building monthly trend for r/{} from {} posts", self.feed.channel, posts.len());
        Ok(monthly_trend(&posts))
    }

    pub async fn analyze_text(&self, text: &str) -> Result<AspectResult, NetworkError> {
        let posts = self.fetch_corpus().await?;
        Ok(self.analyze_with_corpus(text, &posts))
    }

    /// Analyze against an already fetched corpus; performs no I/O.
    pub fn analyze_with_corpus(&self, text: &str, posts: &[Post]) -> AspectResult {
        let result = self.analyzer.analyze(text, posts);
        info!(
            "Statement classified {} ({:.2}) against {} posts",
            result.sentiment,
            result.score,
            posts.len()
        );
        result
    }

    pub async fn search(
        &self,
        query: &str,
        filter: Option<SentimentLabel>,
    ) -> Result<Vec<SearchResult>, NetworkError> {
        let posts = self.fetch_corpus().await?;
        let results = search(&posts, query, filter);
        info!(
            "Search for {:?} (filter: {:?}) matched {} of {} posts",
            query,
            filter,
            results.len(),
            posts.len()
        );
        Ok(results)
    }
}
