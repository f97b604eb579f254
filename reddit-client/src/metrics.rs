use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchMetrics {
    pub total_fetches: u64,
    pub successful_fetches: u64,
    pub failed_fetches: u64,
    pub posts_received: u64,
    pub posts_dropped: u64,
    pub total_response_time: Duration,
    pub last_fetch_time: Option<SystemTime>,
    pub fetches_by_channel: HashMap<String, ChannelMetrics>,
    /// Fetch counts keyed by listing, e.g. `hot` or `top/year`.
    pub fetches_by_listing: HashMap<String, u64>,
    pub errors_by_type: HashMap<String, u64>,
}

impl FetchMetrics {
    pub fn average_response_time(&self) -> Duration {
        if self.total_fetches == 0 {
            Duration::from_millis(0)
        } else {
            self.total_response_time / self.total_fetches as u32
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelMetrics {
    pub fetch_count: u64,
    pub success_count: u64,
    pub error_count: u64,
    pub posts_received: u64,
    pub total_response_time: Duration,
    pub min_response_time: Duration,
    pub max_response_time: Duration,
    pub last_status_code: Option<u16>,
}

/// Outcome of a single listing fetch.
#[derive(Debug, Clone)]
pub struct FetchRecord {
    pub channel: String,
    pub listing: String,
    pub status_code: Option<u16>,
    pub response_time: Duration,
    pub success: bool,
    pub posts_received: usize,
    pub posts_dropped: usize,
    pub error_type: Option<String>,
}

impl ChannelMetrics {
    fn new() -> Self {
        Self {
            fetch_count: 0,
            success_count: 0,
            error_count: 0,
            posts_received: 0,
            total_response_time: Duration::from_millis(0),
            min_response_time: Duration::MAX,
            max_response_time: Duration::from_millis(0),
            last_status_code: None,
        }
    }

    fn update(&mut self, record: &FetchRecord) {
        self.fetch_count += 1;
        self.total_response_time += record.response_time;
        self.posts_received += record.posts_received as u64;
        self.last_status_code = record.status_code;

        if record.response_time < self.min_response_time {
            self.min_response_time = record.response_time;
        }
        if record.response_time > self.max_response_time {
            self.max_response_time = record.response_time;
        }

        if record.success {
            self.success_count += 1;
        } else {
            self.error_count += 1;
        }
    }

    pub fn average_response_time(&self) -> Duration {
        if self.fetch_count == 0 {
            Duration::from_millis(0)
        } else {
            self.total_response_time / self.fetch_count as u32
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.fetch_count == 0 {
            0.0
        } else {
            self.success_count as f64 / self.fetch_count as f64
        }
    }
}

/// In-memory fetch statistics. Observability only; never read by the engine.
#[derive(Debug)]
pub struct MetricsCollector {
    metrics: Arc<RwLock<FetchMetrics>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            metrics: Arc::new(RwLock::new(FetchMetrics::default())),
        }
    }

    pub async fn record_fetch(&self, record: FetchRecord) {
        let mut metrics = self.metrics.write().await;

        metrics.total_fetches += 1;
        metrics.last_fetch_time = Some(SystemTime::now());
        metrics.total_response_time += record.response_time;
        metrics.posts_received += record.posts_received as u64;
        metrics.posts_dropped += record.posts_dropped as u64;

        if record.success {
            metrics.successful_fetches += 1;
        } else {
            metrics.failed_fetches += 1;
        }

        *metrics
            .fetches_by_listing
            .entry(record.listing.clone())
            .or_insert(0) += 1;

        if let Some(error_type) = &record.error_type {
            *metrics.errors_by_type.entry(error_type.clone()).or_insert(0) += 1;
        }

        metrics
            .fetches_by_channel
            .entry(record.channel.clone())
            .or_insert_with(ChannelMetrics::new)
            .update(&record);
    }

    pub async fn get_metrics(&self) -> FetchMetrics {
        self.metrics.read().await.clone()
    }

    pub async fn get_channel_metrics(&self, channel: &str) -> Option<ChannelMetrics> {
        let metrics = self.metrics.read().await;
        metrics.fetches_by_channel.get(channel).cloned()
    }

    pub async fn reset_metrics(&self) {
        let mut metrics = self.metrics.write().await;
        *metrics = FetchMetrics::default();
    }

    pub async fn export_metrics(&self) -> Result<String, serde_json::Error> {
        let metrics = self.get_metrics().await;
        serde_json::to_string_pretty(&metrics)
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
