//! Derived collections: pure functions over a full post collection.
//!
//! Two distinct orderings live here. The post-page collections (related,
//! popular-in-view, previous/next) all derive from the chronological
//! ordering; the standalone globally-popular listing ranks by view count
//! instead. They are reused in different contexts and must not be
//! conflated.

use std::collections::HashSet;

use crate::domain::posts::PostSummary;

/// Cap on related posts within one post-page view.
pub const RELATED_LIMIT: usize = 5;
/// Cap on popular posts within one post-page view.
pub const POPULAR_LIMIT: usize = 3;

/// Immediate neighbors of a reference post in the chronological ordering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Adjacent {
    /// The next-oldest post, `None` at the oldest boundary.
    pub previous: Option<PostSummary>,
    /// The next-newest post, `None` at the newest boundary.
    pub next: Option<PostSummary>,
}

/// All posts sorted by publish date descending (newest first).
///
/// The sort is stable: ties keep the provider's original order.
pub fn chronological(posts: &[PostSummary]) -> Vec<PostSummary> {
    let mut ordered = posts.to_vec();
    ordered.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    ordered
}

/// Previous/next neighbors of `slug` in the chronological ordering.
///
/// Both sides are `None` when the reference post is absent from the
/// collection.
pub fn adjacent(posts: &[PostSummary], slug: &str) -> Adjacent {
    let ordered = chronological(posts);
    let Some(index) = ordered.iter().position(|post| post.slug == slug) else {
        return Adjacent::default();
    };

    Adjacent {
        previous: ordered.get(index + 1).cloned(),
        next: index.checked_sub(1).and_then(|i| ordered.get(i)).cloned(),
    }
}

/// Posts sharing at least one category with the reference, excluding the
/// reference itself, in chronological order, capped at [`RELATED_LIMIT`].
///
/// A reference with no categories yields an empty set.
pub fn related(posts: &[PostSummary], reference: &PostSummary) -> Vec<PostSummary> {
    let titles: HashSet<&str> = reference
        .categories
        .iter()
        .map(|category| category.title())
        .collect();

    if titles.is_empty() {
        return Vec::new();
    }

    chronological(posts)
        .into_iter()
        .filter(|post| post.slug != reference.slug)
        .filter(|post| {
            post.categories
                .iter()
                .any(|category| titles.contains(category.title()))
        })
        .take(RELATED_LIMIT)
        .collect()
}

/// The remaining posts of a post-page view: everything not the reference
/// and not already selected as related, in chronological order, capped at
/// [`POPULAR_LIMIT`]. Disjoint from `related` by construction.
pub fn popular_in_view(
    posts: &[PostSummary],
    reference: &PostSummary,
    related: &[PostSummary],
) -> Vec<PostSummary> {
    let taken: HashSet<&str> = related.iter().map(|post| post.slug.as_str()).collect();

    chronological(posts)
        .into_iter()
        .filter(|post| post.slug != reference.slug)
        .filter(|post| !taken.contains(post.slug.as_str()))
        .take(POPULAR_LIMIT)
        .collect()
}

/// The standalone globally-popular ordering: view count descending, ties
/// keeping provider order. Mirrors the provider's own popular endpoint.
pub fn rank_by_views(posts: &[PostSummary]) -> Vec<PostSummary> {
    let mut ordered = posts.to_vec();
    ordered.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    ordered
}
