pub mod api;
pub mod metrics;


pub use api::{parse_listing, ParsedListing, RedditApiClient, RedditListing, RedditPostData};
pub use metrics::{ChannelMetrics, FetchMetrics, FetchRecord, MetricsCollector};
