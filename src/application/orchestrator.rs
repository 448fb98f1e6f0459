//! Fetch orchestration: the cheapest valid path to a complete post.
//!
//! For a requested slug the orchestrator consults, in order: the composed
//! bundle already in the session cache, a summary carried over by the
//! navigation that triggered the view, the cached all-posts collection,
//! and finally the network. A summary source reduces the network cost to a
//! narrow body-only request; without one, the full post and the collection
//! are fetched in parallel.
//!
//! Every load is scoped to the lifetime of the viewing that requested it:
//! the cancellation token is checked before each state mutation, so a
//! superseded load writes nothing, counts nothing and surfaces nothing.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use metrics::histogram;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::application::collections::{self, Adjacent};
use crate::application::error::ContentError;
use crate::application::views::ViewCounter;
use crate::cache::{ALL_POSTS_KEY, SessionCache, bundle_key};
use crate::domain::language::Language;
use crate::domain::posts::{Post, PostBundle, PostSummary};
use crate::infra::provider::{ContentProvider, ProviderError};

const SOURCE: &str = "vetrina::orchestrator";

/// One post-page load.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub slug: String,
    pub language: Language,
    /// Summary handed off by the navigation that triggered this view;
    /// cheaper than any cache lookup.
    pub carried: Option<PostSummary>,
    /// Background refreshes warm the cache without counting a view.
    pub background: bool,
}

impl LoadRequest {
    pub fn new(slug: impl Into<String>, language: Language) -> Self {
        Self {
            slug: slug.into(),
            language,
            carried: None,
            background: false,
        }
    }

    pub fn with_carried(mut self, summary: PostSummary) -> Self {
        self.carried = Some(summary);
        self
    }

    pub fn background(mut self) -> Self {
        self.background = true;
        self
    }
}

/// Produces a complete post plus derived collections for a requested slug,
/// minimizing redundant network transfer.
#[derive(Clone)]
pub struct FetchOrchestrator {
    provider: Arc<dyn ContentProvider>,
    cache: SessionCache,
    views: ViewCounter,
}

impl FetchOrchestrator {
    pub fn new(
        provider: Arc<dyn ContentProvider>,
        cache: SessionCache,
        views: ViewCounter,
    ) -> Self {
        Self {
            provider,
            cache,
            views,
        }
    }

    /// Resolve `request` into a composed bundle.
    ///
    /// On success the bundle is cached under its `slug-language` key and
    /// the post joins the all-posts collection cache; a non-background
    /// load additionally queues one detached view-count increment.
    pub async fn load(
        &self,
        request: LoadRequest,
        cancel: &CancellationToken,
    ) -> Result<PostBundle, ContentError> {
        let slug = request.slug.trim().to_owned();
        if slug.is_empty() {
            return Err(ContentError::InvalidRequest);
        }
        if cancel.is_cancelled() {
            return Err(ContentError::Cancelled);
        }

        let started = Instant::now();
        let key = bundle_key(&slug, &request.language);

        if let Some(bundle) = self.cache.get::<PostBundle>(&key) {
            debug!(target = SOURCE, slug = %slug, "bundle served from session cache");
            if !request.background {
                self.views.record(&bundle.post.id);
            }
            return Ok(bundle);
        }

        let cached_collection: Option<Vec<PostSummary>> = self.cache.get(ALL_POSTS_KEY);

        // Carried summary beats the collection lookup; either way the
        // summary decides whether a narrow body fetch suffices.
        let summary = request
            .carried
            .filter(|carried| carried.matches(&slug))
            .or_else(|| {
                cached_collection
                    .as_ref()
                    .and_then(|posts| posts.iter().find(|post| post.slug == slug).cloned())
            });

        let (post, collection, collection_fetched) = match summary {
            Some(summary) => {
                self.load_with_summary(&slug, &request.language, summary, cached_collection, cancel)
                    .await?
            }
            None => {
                debug!(target = SOURCE, slug = %slug, "no summary source; full fetch");
                let (post, posts) = self
                    .guarded(
                        cancel,
                        async {
                            tokio::try_join!(
                                self.provider.get_post(&slug),
                                self.provider.list_posts(),
                            )
                        },
                    )
                    .await?;
                let post = post.ok_or_else(|| ContentError::not_found(&slug))?;
                (post, summarize(posts), true)
            }
        };

        let reference = PostSummary::from(post.clone());
        let related = collections::related(&collection, &reference);
        let popular = collections::popular_in_view(&collection, &reference, &related);
        let Adjacent { previous, next } = collections::adjacent(&collection, &slug);

        let bundle = PostBundle {
            post,
            related,
            popular,
            previous,
            next,
        };

        // A load superseded mid-flight must leave no trace.
        if cancel.is_cancelled() {
            debug!(target = SOURCE, slug = %slug, "load cancelled before commit; discarding");
            return Err(ContentError::Cancelled);
        }

        if collection_fetched {
            self.cache.set(ALL_POSTS_KEY, &collection);
        }
        self.remember_summary(reference);
        self.cache.set(&key, &bundle);

        if !request.background {
            self.views.record(&bundle.post.id);
        }

        histogram!("vetrina_load_ms").record(started.elapsed().as_secs_f64() * 1000.0);
        Ok(bundle)
    }

    /// The cheap path: merge the known summary with a body-only fetch.
    ///
    /// The collection leg is skipped entirely when the all-posts cache
    /// already holds it; otherwise both network legs run concurrently with
    /// no mutual ordering.
    async fn load_with_summary(
        &self,
        slug: &str,
        language: &Language,
        summary: PostSummary,
        cached_collection: Option<Vec<PostSummary>>,
        cancel: &CancellationToken,
    ) -> Result<(Post, Vec<PostSummary>, bool), ContentError> {
        debug!(target = SOURCE, slug, "summary source found; narrow body fetch");

        match cached_collection {
            Some(collection) => {
                let body = self
                    .guarded(cancel, self.provider.get_post_body(slug, language))
                    .await?
                    .ok_or_else(|| ContentError::not_found(slug))?;
                Ok((summary.into_post(body), collection, false))
            }
            None => {
                let (body, posts) = self
                    .guarded(
                        cancel,
                        async {
                            tokio::try_join!(
                                self.provider.get_post_body(slug, language),
                                self.provider.list_posts(),
                            )
                        },
                    )
                    .await?;
                let body = body.ok_or_else(|| ContentError::not_found(slug))?;
                Ok((summary.into_post(body), summarize(posts), true))
            }
        }
    }

    /// The all-posts summary collection, from cache when present.
    pub async fn posts(&self) -> Result<Vec<PostSummary>, ContentError> {
        if let Some(posts) = self.cache.get::<Vec<PostSummary>>(ALL_POSTS_KEY) {
            return Ok(posts);
        }

        let posts = summarize(self.provider.list_posts().await?);
        self.cache.set(ALL_POSTS_KEY, &posts);
        Ok(posts)
    }

    /// The globally-popular listing, ranked by the provider.
    pub async fn popular(&self) -> Result<Vec<PostSummary>, ContentError> {
        Ok(summarize(self.provider.popular_posts().await?))
    }

    /// Idempotent union into the all-posts cache, keyed by slug.
    fn remember_summary(&self, summary: PostSummary) {
        let mut posts: Vec<PostSummary> = self.cache.get(ALL_POSTS_KEY).unwrap_or_default();
        if posts.iter().all(|post| post.slug != summary.slug) {
            posts.push(summary);
            self.cache.set(ALL_POSTS_KEY, &posts);
        }
    }

    /// Race `operation` against cancellation.
    async fn guarded<T>(
        &self,
        cancel: &CancellationToken,
        operation: impl Future<Output = Result<T, ProviderError>>,
    ) -> Result<T, ContentError> {
        tokio::select! {
            _ = cancel.cancelled() => Err(ContentError::Cancelled),
            result = operation => result.map_err(ContentError::from),
        }
    }
}

fn summarize(posts: Vec<Post>) -> Vec<PostSummary> {
    posts.into_iter().map(PostSummary::from).collect()
}
