use std::marker::PhantomData;

use async_trait::async_trait;
use gloo::net::http::Request;
use paging::{ListError, ListSource};
use serde::de::DeserializeOwned;
use shared::{ListKey, PageRequest, PagedResponse, ReactionRequest, ReactionResponse};

/// API client for communicating with the marketplace backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the list endpoint `key` is served from
    pub fn list_url(&self, key: &ListKey) -> String {
        format!("{}{}", self.base_url, key.resource_path())
    }

    /// Backend sink the frontend logger ships to
    pub fn log_url(&self) -> String {
        format!("{}/api/logs", self.base_url)
    }

    /// Fetch one page of the list identified by `key`
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        key: &ListKey,
        request: PageRequest,
    ) -> Result<PagedResponse<T>, ListError> {
        let response = Request::get(&self.list_url(key))
            .query(request.query_pairs())
            .query(key.filter_params())
            .send()
            .await
            .map_err(|e| ListError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(ListError::Status { status, message });
        }

        response
            .json::<PagedResponse<T>>()
            .await
            .map_err(|e| ListError::Decode(e.to_string()))
    }

    /// Set or clear the current user's like on a post
    pub async fn react_to_post(&self, post_id: u64, liked: bool) -> Result<ReactionResponse, ListError> {
        let url = format!("{}/api/posts/{}/reactions", self.base_url, post_id);

        let response = Request::post(&url)
            .json(&ReactionRequest { liked })
            .map_err(|e| ListError::Decode(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| ListError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(ListError::Status { status, message });
        }

        response
            .json::<ReactionResponse>()
            .await
            .map_err(|e| ListError::Decode(e.to_string()))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Remote list endpoint for items of type `T`
pub struct EndpointSource<T> {
    client: ApiClient,
    _item: PhantomData<fn() -> T>,
}

impl<T> EndpointSource<T> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _item: PhantomData,
        }
    }
}

#[async_trait(?Send)]
impl<T> ListSource for EndpointSource<T>
where
    T: DeserializeOwned + Clone + 'static,
{
    type Key = ListKey;
    type Item = T;

    async fn fetch_page(
        &self,
        key: &ListKey,
        request: PageRequest,
    ) -> Result<PagedResponse<T>, ListError> {
        self.client.get_page(key, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_list_url() {
        let client = ApiClient::with_base_url("https://api.example.com/".to_string());
        assert_eq!(client.base_url(), "https://api.example.com");
        assert_eq!(
            client.list_url(&ListKey::Comments { event_id: 5 }),
            "https://api.example.com/api/events/5/comments"
        );
        assert_eq!(client.log_url(), "https://api.example.com/api/logs");
    }

    #[wasm_bindgen_test]
    fn test_default_base_url() {
        assert_eq!(ApiClient::default().base_url(), "http://localhost:3000");
    }
}
