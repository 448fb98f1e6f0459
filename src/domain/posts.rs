//! Post records and the partial views this layer merges and caches.
//!
//! A [`Post`] is created and owned by the content provider; this layer only
//! reads it, reassembles it from partial views and writes derived copies
//! into the session cache. The split into [`PostSummary`] and [`PostBody`]
//! makes "summary + body → full post" the only way to assemble a post from
//! parts, so the merge is checked at compile time instead of by
//! field-presence guessing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::domain::language::Localized;

/// A blog article record, potentially bilingual field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Opaque stable identifier assigned by the content provider.
    pub id: String,
    /// Human-readable unique routing key.
    pub slug: String,
    pub title: Localized<String>,
    #[serde(default)]
    pub excerpt: Localized<String>,
    /// Rich-text blocks, opaque to this layer.
    #[serde(default)]
    pub body: Localized<Vec<Value>>,
    /// Provider asset reference, carried but not interpreted.
    #[serde(default)]
    pub main_image: Option<Value>,
    /// Provider author reference, carried but not interpreted.
    #[serde(default)]
    pub author: Option<Value>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
    /// May be stale in any cached copy; this layer only ever requests +1.
    #[serde(default)]
    pub view_count: u64,
}

/// A category reference: either a bare name or an object carrying a title.
///
/// Used only for equality/overlap comparison, never for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Name(String),
    Ref { title: String },
}

impl Category {
    pub fn title(&self) -> &str {
        match self {
            Category::Name(title) => title,
            Category::Ref { title } => title,
        }
    }
}

/// A [`Post`] with the body omitted: the shape carried by list views,
/// navigation state and the all-posts cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: String,
    pub slug: String,
    pub title: Localized<String>,
    #[serde(default)]
    pub excerpt: Localized<String>,
    #[serde(default)]
    pub main_image: Option<Value>,
    #[serde(default)]
    pub author: Option<Value>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
    #[serde(default)]
    pub view_count: u64,
}

impl PostSummary {
    /// Reassemble a full post from this summary and a body-only fetch
    /// result. Total: every summary plus every body yields a post.
    pub fn into_post(self, body: PostBody) -> Post {
        Post {
            id: self.id,
            slug: self.slug,
            title: self.title,
            excerpt: self.excerpt,
            body: body.body,
            main_image: self.main_image,
            author: self.author,
            categories: self.categories,
            published_at: self.published_at,
            view_count: self.view_count,
        }
    }

    pub fn matches(&self, slug: &str) -> bool {
        self.slug == slug
    }
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            slug: post.slug,
            title: post.title,
            excerpt: post.excerpt,
            main_image: post.main_image,
            author: post.author,
            categories: post.categories,
            published_at: post.published_at,
            view_count: post.view_count,
        }
    }
}

/// The narrow body-only record returned by the provider's body endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBody {
    pub slug: String,
    #[serde(default)]
    pub body: Localized<Vec<Value>>,
}

/// The composed per-view record cached under a `slug-language` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBundle {
    pub post: Post,
    pub related: Vec<PostSummary>,
    pub popular: Vec<PostSummary>,
    pub previous: Option<PostSummary>,
    pub next: Option<PostSummary>,
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::domain::language::Language;

    fn sample_post(slug: &str) -> Post {
        Post {
            id: format!("id-{slug}"),
            slug: slug.to_owned(),
            title: Localized::Plain("Title".to_owned()),
            excerpt: Localized::Plain("Excerpt".to_owned()),
            body: Localized::Plain(vec![serde_json::json!({"_type": "block"})]),
            main_image: None,
            author: None,
            categories: vec![Category::Name("design".to_owned())],
            published_at: datetime!(2024-02-01 0:00 UTC),
            view_count: 7,
        }
    }

    #[test]
    fn summary_strips_only_the_body() {
        let post = sample_post("hello");
        let summary = PostSummary::from(post.clone());

        assert_eq!(summary.id, post.id);
        assert_eq!(summary.slug, post.slug);
        assert_eq!(summary.categories, post.categories);
        assert_eq!(summary.published_at, post.published_at);
        assert_eq!(summary.view_count, post.view_count);
    }

    #[test]
    fn merge_restores_the_original_post() {
        let post = sample_post("hello");
        let summary = PostSummary::from(post.clone());
        let body = PostBody {
            slug: post.slug.clone(),
            body: post.body.clone(),
        };

        assert_eq!(summary.into_post(body), post);
    }

    #[test]
    fn category_shapes_compare_by_title() {
        let bare: Category = serde_json::from_str(r#""studio""#).expect("bare name");
        let object: Category =
            serde_json::from_str(r#"{"title":"studio","_id":"cat-1"}"#).expect("titled object");

        assert_eq!(bare.title(), "studio");
        assert_eq!(object.title(), "studio");
    }

    #[test]
    fn post_deserializes_provider_shape() {
        let raw = r#"{
            "id": "a1",
            "slug": "first-post",
            "title": {"en": "First", "pl": "Pierwszy"},
            "excerpt": "plain excerpt",
            "body": {"en": [{"_type": "block", "text": "hi"}]},
            "categories": ["studio", {"title": "craft"}],
            "publishedAt": "2024-03-01T00:00:00Z",
            "viewCount": 12
        }"#;

        let post: Post = serde_json::from_str(raw).expect("provider record");
        assert_eq!(post.title.resolve(&Language::pl()), "Pierwszy");
        assert_eq!(post.excerpt.resolve(&Language::pl()), "plain excerpt");
        assert_eq!(post.categories.len(), 2);
        assert_eq!(post.view_count, 12);
        assert_eq!(post.body.resolve(&Language::en()).len(), 1);
    }
}
