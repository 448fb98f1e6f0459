//! HTTP implementation of the content provider.

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::ProviderSettings;
use crate::domain::language::Language;
use crate::domain::posts::{Post, PostBody};

use super::provider::{ContentProvider, ProviderError};

/// Content provider reachable over HTTP, JSON in both directions.
#[derive(Clone, Debug)]
pub struct HttpContentProvider {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpContentProvider {
    pub fn new(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let base = Url::parse(&settings.base_url)?.join("/")?;
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self {
            client,
            base,
            token: settings.api_token.clone(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("vetrina/", env!("CARGO_PKG_VERSION"))
    }

    fn url(&self, path: &str) -> Result<Url, ProviderError> {
        self.base.join(path).map_err(ProviderError::Url)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let mut req = self.client.request(method, url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ProviderError> {
        let resp = self.request(Method::GET, url).send().await?;
        Self::handle(resp).await
    }

    /// GET where a 404 means the record does not exist rather than a fault.
    async fn get_optional<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<Option<T>, ProviderError> {
        let resp = self.request(Method::GET, url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::handle(resp).await.map(Some)
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, ProviderError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        serde_json::from_slice(&bytes).map_err(ProviderError::decode)
    }
}

#[async_trait]
impl ContentProvider for HttpContentProvider {
    async fn list_posts(&self) -> Result<Vec<Post>, ProviderError> {
        self.get_json(self.url("posts")?).await
    }

    async fn get_post(&self, slug: &str) -> Result<Option<Post>, ProviderError> {
        self.get_optional(self.url(&format!("posts/{slug}"))?).await
    }

    async fn get_post_body(
        &self,
        slug: &str,
        language: &Language,
    ) -> Result<Option<PostBody>, ProviderError> {
        let mut url = self.url(&format!("posts/{slug}/body"))?;
        url.query_pairs_mut().append_pair("lang", language.as_str());
        self.get_optional(url).await
    }

    async fn popular_posts(&self) -> Result<Vec<Post>, ProviderError> {
        self.get_json(self.url("posts/popular")?).await
    }

    async fn increment_view_count(&self, post_id: &str) -> Result<(), ProviderError> {
        let url = self.url("views")?;
        let resp = self
            .request(Method::POST, url)
            .json(&json!({ "postId": post_id }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
