//! HTTP provider tests against an in-process fixture server.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use serde_json::{Value, json};

use vetrina::config::ProviderSettings;
use vetrina::domain::language::Language;
use vetrina::infra::http::HttpContentProvider;
use vetrina::infra::provider::{ContentProvider, ProviderError};

#[derive(Clone, Default)]
struct FixtureState {
    views: Arc<Mutex<Vec<Value>>>,
}

fn post_json(slug: &str, published_at: &str, views: u64) -> Value {
    json!({
        "id": format!("id-{slug}"),
        "slug": slug,
        "title": { "en": format!("Title {slug}"), "pl": format!("Tytuł {slug}") },
        "excerpt": "shared excerpt",
        "body": { "en": [{ "_type": "block", "text": slug }] },
        "categories": ["studio"],
        "publishedAt": published_at,
        "viewCount": views
    })
}

async fn list_posts() -> impl IntoResponse {
    axum::Json(json!([
        post_json("first", "2024-03-01T00:00:00Z", 9),
        post_json("second", "2024-02-01T00:00:00Z", 4),
    ]))
}

async fn get_post(Path(slug): Path<String>) -> impl IntoResponse {
    if slug == "first" {
        axum::Json(post_json("first", "2024-03-01T00:00:00Z", 9)).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn get_post_body(
    Path(slug): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if slug != "first" {
        return StatusCode::NOT_FOUND.into_response();
    }

    let lang = query.get("lang").cloned().unwrap_or_default();
    axum::Json(json!({
        "slug": slug,
        "body": { "en": [{ "_type": "block", "lang": lang }] }
    }))
    .into_response()
}

async fn popular_posts() -> impl IntoResponse {
    axum::Json(json!([
        post_json("first", "2024-03-01T00:00:00Z", 9),
        post_json("second", "2024-02-01T00:00:00Z", 4),
    ]))
}

async fn record_view(State(state): State<FixtureState>, axum::Json(body): axum::Json<Value>) -> StatusCode {
    state.views.lock().expect("views lock").push(body);
    StatusCode::NO_CONTENT
}

async fn flaky() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, "upstream unavailable")
}

async fn not_json() -> impl IntoResponse {
    "plain text, not a post"
}

async fn serve(state: FixtureState) -> SocketAddr {
    let app = Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/popular", get(popular_posts))
        .route("/posts/{slug}", get(get_post))
        .route("/posts/{slug}/body", get(get_post_body))
        .route("/views", post(record_view))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fixture server");
    });
    addr
}

fn provider_for(addr: SocketAddr) -> HttpContentProvider {
    HttpContentProvider::new(&ProviderSettings {
        base_url: format!("http://{addr}/"),
        api_token: None,
        view_count_timeout_secs: 4,
    })
    .expect("provider against fixture")
}

#[tokio::test]
async fn lists_posts_from_the_provider() {
    let addr = serve(FixtureState::default()).await;
    let provider = provider_for(addr);

    let posts = provider.list_posts().await.expect("post listing");
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].slug, "first");
    assert_eq!(posts[0].title.resolve(&Language::pl()), "Tytuł first");
    assert_eq!(posts[0].view_count, 9);
}

#[tokio::test]
async fn fetches_a_single_post_by_slug() {
    let addr = serve(FixtureState::default()).await;
    let provider = provider_for(addr);

    let found = provider.get_post("first").await.expect("existing post");
    assert_eq!(found.expect("record present").slug, "first");

    let missing = provider.get_post("missing").await.expect("absent post");
    assert!(missing.is_none());
}

#[tokio::test]
async fn body_request_is_narrow_and_carries_the_language() {
    let addr = serve(FixtureState::default()).await;
    let provider = provider_for(addr);

    let body = provider
        .get_post_body("first", &Language::pl())
        .await
        .expect("body record")
        .expect("record present");

    assert_eq!(body.slug, "first");
    let blocks = body.body.resolve(&Language::en());
    assert_eq!(blocks[0].get("lang").and_then(Value::as_str), Some("pl"));

    let missing = provider
        .get_post_body("missing", &Language::en())
        .await
        .expect("absent body");
    assert!(missing.is_none());
}

#[tokio::test]
async fn popular_listing_decodes_in_provider_order() {
    let addr = serve(FixtureState::default()).await;
    let provider = provider_for(addr);

    let posts = provider.popular_posts().await.expect("popular listing");
    let views: Vec<u64> = posts.iter().map(|post| post.view_count).collect();
    assert_eq!(views, [9, 4]);
}

#[tokio::test]
async fn increment_posts_the_expected_json_body() {
    let state = FixtureState::default();
    let addr = serve(state.clone()).await;
    let provider = provider_for(addr);

    provider
        .increment_view_count("id-first")
        .await
        .expect("increment accepted");

    let views = state.views.lock().expect("views lock");
    assert_eq!(views.len(), 1);
    assert_eq!(views[0], json!({ "postId": "id-first" }));
}

#[tokio::test]
async fn non_success_status_maps_to_a_status_error() {
    let app = Router::new().route("/posts", get(flaky));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fixture server");
    });

    let provider = provider_for(addr);
    let error = provider.list_posts().await.expect_err("bad gateway");

    match error {
        ProviderError::Status { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "upstream unavailable");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_payload_maps_to_a_decode_error() {
    let app = Router::new().route("/posts", get(not_json));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fixture server");
    });

    let provider = provider_for(addr);
    let error = provider.list_posts().await.expect_err("non-JSON payload");
    assert!(matches!(error, ProviderError::Decode(_)));
}
