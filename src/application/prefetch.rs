//! Fire-and-forget cache warming ahead of a likely navigation.

use std::sync::Arc;

use metrics::counter;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::application::orchestrator::{FetchOrchestrator, LoadRequest};
use crate::domain::language::Language;

const SOURCE: &str = "vetrina::prefetch";

/// Low-cost UI signal that makes a navigation likely.
///
/// All three funnel through the identical acquisition path, so behavior is
/// consistent across pointer, keyboard and touch input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefetchTrigger {
    PointerEnter,
    Focus,
    TouchStart,
}

impl PrefetchTrigger {
    fn as_str(self) -> &'static str {
        match self {
            PrefetchTrigger::PointerEnter => "pointer-enter",
            PrefetchTrigger::Focus => "focus",
            PrefetchTrigger::TouchStart => "touch-start",
        }
    }
}

/// Warms the orchestrator's cache without blocking the interaction that
/// triggered it.
///
/// Safe to call redundantly — once a bundle is cached, repeats return from
/// the cache before any network traffic, so no in-flight registry is kept.
#[derive(Clone)]
pub struct Prefetcher {
    orchestrator: Arc<FetchOrchestrator>,
}

impl Prefetcher {
    pub fn new(orchestrator: Arc<FetchOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Trigger the acquisition path for `slug` as a detached background
    /// load. The caller is never blocked and never sees the outcome.
    pub fn prefetch(&self, slug: &str, language: Language, trigger: PrefetchTrigger) {
        counter!("vetrina_prefetch_total").increment(1);
        debug!(
            target = SOURCE,
            slug,
            trigger = trigger.as_str(),
            "prefetching post bundle"
        );

        let orchestrator = self.orchestrator.clone();
        let request = LoadRequest::new(slug, language).background();

        tokio::spawn(async move {
            // Prefetches outlive the triggering interaction: the token is
            // never cancelled, and a background load records no view.
            let cancel = CancellationToken::new();
            if let Err(error) = orchestrator.load(request, &cancel).await {
                if !error.is_cancelled() {
                    debug!(target = SOURCE, error = %error, "prefetch did not complete");
                }
            }
        });
    }
}
