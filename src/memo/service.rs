//! HTTP client for the MemoApp REST backend
//!
//! Thin wrapper over plain REST verbs on the memos resource. JSON bodies
//! are passed through as the backend defines them; retry and backoff
//! policy belongs to callers, not here.

use super::{
    BulkPriorityUpdateRequest, CreateMemoRequest, Memo, Priority, PriorityStats,
    PriorityUpdateRequest, UpdateMemoRequest,
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Memo service errors
#[derive(Debug, thiserror::Error)]
pub enum MemoError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("Invalid service configuration: {0}")]
    Config(String),
}

pub type MemoResult<T> = std::result::Result<T, MemoError>;

/// Client for the memos resource
#[derive(Debug, Clone)]
pub struct MemoService {
    client: Client,
    base_url: String,
}

impl MemoService {
    /// Create a service pointed at the API base URL (e.g.
    /// `http://localhost:8080/api`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> MemoResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MemoError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/memos{}", self.base_url, path)
    }

    async fn expect<T: DeserializeOwned>(response: reqwest::Response) -> MemoResult<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MemoError::Api { status, message });
        }
        Ok(response.json().await?)
    }

    /// List memos, optionally filtered by priority and sorted.
    pub async fn list(
        &self,
        priority: Option<Priority>,
        sort: Option<&str>,
    ) -> MemoResult<Vec<Memo>> {
        let mut request = self.client.get(self.url(""));
        if let Some(priority) = priority {
            request = request.query(&[("priority", priority.as_str())]);
        }
        if let Some(sort) = sort {
            request = request.query(&[("sort", sort)]);
        }

        debug!("Listing memos (priority={:?}, sort={:?})", priority, sort);
        Self::expect(request.send().await?).await
    }

    pub async fn get(&self, id: i64) -> MemoResult<Memo> {
        let response = self.client.get(self.url(&format!("/{}", id))).send().await?;
        Self::expect(response).await
    }

    pub async fn create(&self, memo: &CreateMemoRequest) -> MemoResult<Memo> {
        let response = self.client.post(self.url("")).json(memo).send().await?;
        Self::expect(response).await
    }

    pub async fn update(&self, id: i64, memo: &UpdateMemoRequest) -> MemoResult<Memo> {
        let response = self
            .client
            .put(self.url(&format!("/{}", id)))
            .json(memo)
            .send()
            .await?;
        Self::expect(response).await
    }

    pub async fn delete(&self, id: i64) -> MemoResult<()> {
        debug!("Deleting memo {}", id);
        let response = self
            .client
            .delete(self.url(&format!("/{}", id)))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MemoError::Api { status, message });
        }
        Ok(())
    }

    pub async fn update_priority(&self, id: i64, priority: Priority) -> MemoResult<Memo> {
        let response = self
            .client
            .put(self.url(&format!("/{}/priority", id)))
            .json(&PriorityUpdateRequest { priority })
            .send()
            .await?;
        Self::expect(response).await
    }

    pub async fn bulk_update_priority(
        &self,
        memo_ids: Vec<i64>,
        priority: Priority,
    ) -> MemoResult<Vec<Memo>> {
        let response = self
            .client
            .post(self.url("/bulk/priority"))
            .json(&BulkPriorityUpdateRequest { memo_ids, priority })
            .send()
            .await?;
        Self::expect(response).await
    }

    pub async fn priority_stats(&self) -> MemoResult<PriorityStats> {
        let response = self.client.get(self.url("/stats/priority")).send().await?;
        Self::expect(response).await
    }
}
