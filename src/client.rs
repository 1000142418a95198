//! HTTP client for a running prompt gallery server.
//!
//! `HttpStore` implements [`PromptStore`] over the REST surface, so the CLI
//! can work against a remote server exactly as it does against a local file.

use crate::api::ErrorBody;
use crate::core::data::{Prompt, PromptInput, PromptPatch, PromptStats};
use crate::core::search::{CategoryFilter, FilterCriteria};
use crate::core::state::Highlights;
use crate::core::traits::PromptStore;
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

pub struct HttpStore {
    client: Client,
    base_url: Url,
}

impl HttpStore {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::System(format!("Invalid server URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::System(format!("Invalid server URL '{}'", base_url)));
        }

        Ok(Self {
            client: Client::builder()
                .user_agent(concat!("prompt-gallery/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?,
            base_url,
        })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder, id: Option<&str>) -> AppResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Request to {} failed: {}", self.base_url, e)))?;

        let status = response.status();
        debug!(%status, url = %response.url(), "server responded");
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };

        Err(match status {
            StatusCode::NOT_FOUND => AppError::not_found(id.unwrap_or_default()),
            StatusCode::BAD_REQUEST => AppError::validation(message),
            _ => AppError::storage(format!("{} - {}", status, message)),
        })
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder, id: Option<&str>) -> AppResult<T> {
        self.send(request, id)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Network(format!("Failed to parse server response: {}", e)))
    }

    /// Server-side filtered listing
    pub async fn search(&self, criteria: &FilterCriteria) -> AppResult<Vec<Prompt>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(term) = &criteria.search_term {
            query.push(("search", term.clone()));
        }
        if let CategoryFilter::Only(name) = &criteria.category {
            query.push(("category", name.clone()));
        }
        if !criteria.tags.is_empty() {
            query.push(("tags", criteria.tags.iter().cloned().collect::<Vec<_>>().join(",")));
        }
        if criteria.favorites_only {
            query.push(("favorites", "true".to_string()));
        }

        let request = self.client.get(self.url(&["prompts"])).query(&query);
        self.json(request, None).await
    }

    pub async fn highlights(&self) -> AppResult<Highlights> {
        self.json(self.client.get(self.url(&["prompts", "highlights"])), None)
            .await
    }

    pub async fn stats(&self) -> AppResult<PromptStats> {
        self.json(self.client.get(self.url(&["prompts", "stats"])), None)
            .await
    }
}

#[async_trait]
impl PromptStore for HttpStore {
    async fn create(&self, input: PromptInput) -> AppResult<Prompt> {
        let request = self.client.post(self.url(&["prompts"])).json(&input);
        self.json(request, None).await
    }

    async fn get(&self, id: &str) -> AppResult<Prompt> {
        let request = self.client.get(self.url(&["prompts", id]));
        self.json(request, Some(id)).await
    }

    async fn list(&self) -> AppResult<Vec<Prompt>> {
        self.json(self.client.get(self.url(&["prompts"])), None).await
    }

    async fn replace(&self, id: &str, input: PromptInput) -> AppResult<Prompt> {
        let request = self.client.put(self.url(&["prompts", id])).json(&input);
        self.json(request, Some(id)).await
    }

    async fn patch(&self, id: &str, patch: PromptPatch) -> AppResult<Prompt> {
        let request = self.client.patch(self.url(&["prompts", id])).json(&patch);
        self.json(request, Some(id)).await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let request = self.client.delete(self.url(&["prompts", id]));
        self.send(request, Some(id)).await?;
        Ok(())
    }

    async fn mark_used(&self, id: &str) -> AppResult<Prompt> {
        let request = self.client.post(self.url(&["prompts", id, "use"]));
        self.json(request, Some(id)).await
    }
}
