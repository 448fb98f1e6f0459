//! Best-effort view counting, decoupled from render and navigation.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tracing::debug;

use crate::infra::provider::ContentProvider;

const SOURCE: &str = "vetrina::views";

/// Issues a single +1 write per successful page view and ignores the
/// outcome. The request is bounded by a timeout, never retried, and never
/// surfaces to the UI.
#[derive(Clone)]
pub struct ViewCounter {
    provider: Arc<dyn ContentProvider>,
    timeout: Duration,
}

impl ViewCounter {
    pub fn new(provider: Arc<dyn ContentProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Queue the increment as a detached task and return immediately.
    pub fn record(&self, post_id: &str) {
        let provider = self.provider.clone();
        let timeout = self.timeout;
        let post_id = post_id.to_owned();

        tokio::spawn(async move {
            match tokio::time::timeout(timeout, provider.increment_view_count(&post_id)).await {
                Ok(Ok(())) => {
                    debug!(target = SOURCE, post_id = %post_id, "view recorded");
                }
                Ok(Err(error)) => {
                    counter!("vetrina_view_count_failure_total").increment(1);
                    debug!(target = SOURCE, post_id = %post_id, error = %error, "view count increment failed");
                }
                Err(_) => {
                    counter!("vetrina_view_count_failure_total").increment(1);
                    debug!(target = SOURCE, post_id = %post_id, "view count increment timed out");
                }
            }
        });
    }
}
