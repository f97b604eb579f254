use crate::metrics::{FetchRecord, MetricsCollector};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pulse_core::{validate_channel, FeedRequest, NetworkError, Post, PostSource, RedditConfig};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    #[serde(default)]
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub dist: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    #[serde(default)]
    pub kind: String,
    pub data: T,
}

/// The subset of a `t3` record the engine reads. Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditPostData {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: Option<String>,
    pub score: i64,
    pub created_utc: f64,
}

impl TryFrom<RedditPostData> for Post {
    type Error = String;

    fn try_from(post_data: RedditPostData) -> Result<Self, Self::Error> {
        let created_at = timestamp_from_epoch(post_data.created_utc).ok_or_else(|| {
            format!(
                "post {} has unrepresentable created_utc {}",
                post_data.id, post_data.created_utc
            )
        })?;

        Ok(Self {
            id: post_data.id,
            title: post_data.title,
            body: post_data.selftext.filter(|text| !text.is_empty()),
            score: post_data.score,
            created_at,
        })
    }
}

fn timestamp_from_epoch(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1_000_000_000.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
}

/// Posts decoded from one listing page, plus how many children were rejected.
#[derive(Debug, Clone, Default)]
pub struct ParsedListing {
    pub posts: Vec<Post>,
    pub dropped: usize,
}

/// Decode a listing body. The envelope must be well formed; individual
/// children that fail validation are dropped and counted.
pub fn parse_listing(body: &[u8]) -> Result<ParsedListing, NetworkError> {
    let listing: RedditListing<serde_json::Value> =
        serde_json::from_slice(body).map_err(|e| {
            error!("Failed to parse listing envelope: {}", e);
            NetworkError::InvalidResponse {
                details: format!("listing envelope: {}", e),
            }
        })?;

    let mut parsed = ParsedListing {
        posts: Vec::with_capacity(listing.data.children.len()),
        dropped: 0,
    };

    for child in listing.data.children {
        let decoded = serde_json::from_value::<RedditPostData>(child.data)
            .map_err(|e| e.to_string())
            .and_then(Post::try_from);

        match decoded {
            Ok(post) => parsed.posts.push(post),
            Err(reason) => {
                warn!("Dropping malformed listing child: {}", reason);
                parsed.dropped += 1;
            }
        }
    }

    Ok(parsed)
}

/// Client for Reddit's public JSON listings.
///
/// Credentials in [`RedditConfig`] are never sent; the `.json` endpoints are
/// read anonymously with a descriptive user agent.
#[derive(Debug)]
pub struct RedditApiClient {
    http_client: Client,
    base_url: String,
    user_agent: String,
    metrics: Arc<MetricsCollector>,
}

impl RedditApiClient {
    pub fn new(config: &RedditConfig) -> Result<Self, NetworkError> {
        let http_client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .build()?;

        Ok(Self::with_http_client(config, http_client))
    }

    /// Use a pre-built HTTP client; its user agent and timeout settings win
    /// over the ones in `config`.
    pub fn with_http_client(config: &RedditConfig, http_client: Client) -> Self {
        Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            metrics: Arc::new(MetricsCollector::new()),
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn listing_endpoint(request: &FeedRequest) -> String {
        format!(
            "/r/{}/{}.json",
            request.channel,
            request.listing.path_segment()
        )
    }

    pub fn listing_url(&self, request: &FeedRequest) -> String {
        format!("{}{}", self.base_url, Self::listing_endpoint(request))
    }

    /// Fetch the hot listing for a channel.
    pub async fn fetch_posts(&self, channel: &str, limit: u32) -> Result<Vec<Post>, NetworkError> {
        self.fetch_listing(&FeedRequest::hot(channel, limit)).await
    }

    /// One GET against the listing endpoint. Failures are returned as-is,
    /// without retry. A channel name that is not a plain identifier is
    /// rejected before any request is made.
    pub async fn fetch_listing(&self, request: &FeedRequest) -> Result<Vec<Post>, NetworkError> {
        if validate_channel(&request.channel).is_err() {
            warn!("Refusing listing request for channel {:?}", request.channel);
            return Err(NetworkError::InvalidChannel {
                channel: request.channel.clone(),
            });
        }

        let start_time = Instant::now();
        let outcome = self.execute(request).await;

        let record = match &outcome {
            Ok((status, parsed)) => FetchRecord {
                channel: request.channel.clone(),
                listing: request.listing.to_string(),
                status_code: Some(*status),
                response_time: start_time.elapsed(),
                success: true,
                posts_received: parsed.posts.len(),
                posts_dropped: parsed.dropped,
                error_type: None,
            },
            Err(e) => FetchRecord {
                channel: request.channel.clone(),
                listing: request.listing.to_string(),
                status_code: match e {
                    NetworkError::Status { status_code, .. } => Some(*status_code),
                    NetworkError::ChannelNotFound { .. } => Some(404),
                    NetworkError::Forbidden { .. } => Some(403),
                    _ => None,
                },
                response_time: start_time.elapsed(),
                success: false,
                posts_received: 0,
                posts_dropped: 0,
                error_type: Some(error_type(e).to_string()),
            },
        };
        self.metrics.record_fetch(record).await;

        let (_, parsed) = outcome?;
        info!(
            "Retrieved {} posts from r/{} ({}), dropped {}",
            parsed.posts.len(),
            request.channel,
            request.listing,
            parsed.dropped
        );
        Ok(parsed.posts)
    }

    async fn execute(&self, request: &FeedRequest) -> Result<(u16, ParsedListing), NetworkError> {
        let endpoint = Self::listing_endpoint(request);
        let url = format!("{}{}", self.base_url, endpoint);

        let limit = request.limit.to_string();
        let mut params = vec![("limit", limit.as_str())];
        if let Some(range) = request.listing.time_range() {
            params.push(("t", range.as_str()));
        }

        info!("Making Reddit listing request: GET {}", endpoint);
        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/json")
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                error!("Network error for GET {}: {}", endpoint, e);
                if e.is_timeout() {
                    NetworkError::Timeout {
                        endpoint: endpoint.clone(),
                    }
                } else {
                    NetworkError::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Request failed with status: {} for {}", status, endpoint);
            return Err(match status {
                StatusCode::NOT_FOUND => NetworkError::ChannelNotFound {
                    channel: request.channel.clone(),
                },
                StatusCode::FORBIDDEN => NetworkError::Forbidden { resource: endpoint },
                other => NetworkError::Status {
                    status_code: other.as_u16(),
                    endpoint,
                },
            });
        }
        debug!("Request successful: {} {}", status, endpoint);

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                NetworkError::Timeout {
                    endpoint: endpoint.clone(),
                }
            } else {
                NetworkError::Transport(e)
            }
        })?;

        Ok((status.as_u16(), parse_listing(&body)?))
    }

    pub async fn get_metrics(&self) -> crate::metrics::FetchMetrics {
        self.metrics.get_metrics().await
    }

    pub async fn reset_metrics(&self) {
        self.metrics.reset_metrics().await;
    }

    pub async fn export_metrics(&self) -> Result<String, serde_json::Error> {
        self.metrics.export_metrics().await
    }
}

fn error_type(error: &NetworkError) -> &'static str {
    match error {
        NetworkError::Transport(_) => "transport",
        NetworkError::Timeout { .. } => "timeout",
        NetworkError::Status { .. } => "status",
        NetworkError::InvalidChannel { .. } => "invalid_channel",
        NetworkError::ChannelNotFound { .. } => "not_found",
        NetworkError::Forbidden { .. } => "forbidden",
        NetworkError::InvalidResponse { .. } => "invalid_response",
    }
}

#[async_trait]
impl PostSource for RedditApiClient {
    async fn fetch(&self, request: &FeedRequest) -> Result<Vec<Post>, NetworkError> {
        self.fetch_listing(request).await
    }
}
