//! Content provider trait: the headless CMS seen as a black box.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::language::Language;
use crate::domain::posts::{Post, PostBody};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid provider URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("content provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("content provider response could not be decoded: {0}")]
    Decode(String),
}

impl ProviderError {
    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Read/write surface of the content provider.
///
/// `list_posts` returns full records in provider order (typically
/// newest-first). `get_post`/`get_post_body` return `None` when the
/// provider has no record for the slug. `popular_posts` is ordered by view
/// count on the provider side.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, ProviderError>;

    async fn get_post(&self, slug: &str) -> Result<Option<Post>, ProviderError>;

    /// Narrow request for the localized body only, cheaper than a full
    /// post fetch when the remaining fields are already held.
    async fn get_post_body(
        &self,
        slug: &str,
        language: &Language,
    ) -> Result<Option<PostBody>, ProviderError>;

    async fn popular_posts(&self) -> Result<Vec<Post>, ProviderError>;

    /// Single +1 write; the caller treats every outcome as best-effort.
    async fn increment_view_count(&self, post_id: &str) -> Result<(), ProviderError>;
}
