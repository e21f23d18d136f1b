//! HTTP Document Store Client
//!
//! REST implementation of [`RemoteDocumentStore`] for any document-oriented
//! network backend. All requests carry the configured API key; owner-scoped
//! requests additionally carry the session's bearer token, which the UI
//! shell sets after sign-in and clears on sign-out.
//!
//! ## Endpoints
//!
//! - `POST   /documents` - create, returns the stored row
//! - `PATCH  /documents/{id}` - partial update
//! - `GET    /documents?owner_id=...` - owner listing, newest first
//! - `GET    /documents/shared/{share_id}` - anonymous public read
//! - `PATCH  /documents/{id}/visibility` - share toggle, returns the share id

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use super::{RemoteDocumentStore, StoredDocument};
use crate::shared::{AppConfig, DocumentUpdate, StoreError, StoreResult};

/// HTTP client for the remote document store
#[derive(Debug)]
pub struct HttpDocumentStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    token: RwLock<Option<String>>,
}

#[derive(Debug, Serialize)]
struct InsertDocumentRequest<'a> {
    owner_id: &'a str,
    title: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateDocumentRequest<'a> {
    owner_id: &'a str,
    #[serde(flatten)]
    changes: &'a DocumentUpdate,
}

#[derive(Debug, Serialize)]
struct SetVisibilityRequest<'a> {
    owner_id: &'a str,
    is_public: bool,
}

#[derive(Debug, Deserialize)]
struct SetVisibilityResponse {
    share_id: String,
}

impl HttpDocumentStore {
    /// Create a new client from the application configuration
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.server_url().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            token: RwLock::new(None),
        }
    }

    /// Set the session bearer token used for owner-scoped requests
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the API key and, when present, the session bearer token
    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let mut request = request;
        if let Some(api_key) = &self.api_key {
            request = request.header("apikey", api_key);
        }
        if let Some(token) = self.token.read().await.as_ref() {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        request
    }

    /// Map a non-success response to a backend error with the body as detail
    async fn backend_error(response: Response) -> StoreError {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());
        StoreError::backend(status.as_u16(), error_text)
    }
}

#[async_trait]
impl RemoteDocumentStore for HttpDocumentStore {
    async fn insert(
        &self,
        owner_id: &str,
        title: &str,
        content: &str,
    ) -> StoreResult<StoredDocument> {
        let url = self.url("/documents");
        let body = InsertDocumentRequest {
            owner_id,
            title,
            content,
        };

        let request = self.authorize(self.client.post(&url)).await;
        let response = request.json(&body).send().await?;
        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        let stored = response.json::<StoredDocument>().await?;
        debug!(id = %stored.id, "document created remotely");
        Ok(stored)
    }

    async fn update(&self, id: &str, owner_id: &str, changes: &DocumentUpdate) -> StoreResult<()> {
        let url = self.url(&format!("/documents/{}", id));
        let body = UpdateDocumentRequest { owner_id, changes };

        let request = self.authorize(self.client.patch(&url)).await;
        let response = request.json(&body).send().await?;
        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(StoreError::not_found(id)),
            _ => Err(Self::backend_error(response).await),
        }
    }

    async fn query_by_owner(&self, owner_id: &str) -> StoreResult<Vec<StoredDocument>> {
        let url = self.url("/documents");
        let request = self.authorize(self.client.get(&url)).await;
        let response = request
            .query(&[("owner_id", owner_id), ("order", "updated_at.desc")])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        let rows = response.json::<Vec<StoredDocument>>().await?;
        debug!(count = rows.len(), "fetched owner documents");
        Ok(rows)
    }

    async fn query_by_share_id(&self, share_id: &str) -> StoreResult<Option<StoredDocument>> {
        let url = self.url(&format!("/documents/shared/{}", share_id));
        let request = self.authorize(self.client.get(&url)).await;
        let response = request.send().await?;
        match response.status() {
            status if status.is_success() => Ok(Some(response.json::<StoredDocument>().await?)),
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(Self::backend_error(response).await),
        }
    }

    async fn set_public(&self, id: &str, owner_id: &str, is_public: bool) -> StoreResult<String> {
        let url = self.url(&format!("/documents/{}/visibility", id));
        let body = SetVisibilityRequest {
            owner_id,
            is_public,
        };

        let request = self.authorize(self.client.patch(&url)).await;
        let response = request.json(&body).send().await?;
        match response.status() {
            status if status.is_success() => {
                let parsed = response.json::<SetVisibilityResponse>().await?;
                Ok(parsed.share_id)
            }
            StatusCode::NOT_FOUND => Err(StoreError::not_found(id)),
            _ => Err(Self::backend_error(response).await),
        }
    }
}
