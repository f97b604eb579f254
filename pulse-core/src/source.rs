use crate::{FeedRequest, NetworkError, Post};
use async_trait::async_trait;

/// Anything that can produce a bounded list of posts for a channel listing.
///
/// Implementations perform at most one round trip per call and never retry.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch(&self, request: &FeedRequest) -> Result<Vec<Post>, NetworkError>;
}

#[async_trait]
impl<T: PostSource + ?Sized> PostSource for std::sync::Arc<T> {
    async fn fetch(&self, request: &FeedRequest) -> Result<Vec<Post>, NetworkError> {
        (**self).fetch(request).await
    }
}
