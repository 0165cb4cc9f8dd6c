//! HTTP RemoteStore implementation.
//!
//! Talks to a single fixed-URL resource: `GET` returns the stored snapshot
//! (or 404 when none exists), `POST` replaces it with a full snapshot.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::RemoteError;
use crate::remote::RemoteStore;
use crate::snapshot::CharacterSnapshot;

/// Remote store backed by an HTTP endpoint.
pub struct HttpRemoteStore {
    url: String,
    http_client: reqwest::Client,
}

impl HttpRemoteStore {
    /// Create a store for the given resource URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Create a store with a preconfigured client (timeouts, proxies).
    pub fn with_client(url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            http_client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn load(&self) -> Result<Option<CharacterSnapshot>, RemoteError> {
        tracing::debug!("Loading character snapshot from {}", self.url);

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("No stored character at {}", self.url);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        let snapshot = CharacterSnapshot::from_body(&body)?;
        tracing::debug!("Loaded character snapshot ({} bytes)", body.len());
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &CharacterSnapshot) -> Result<(), RemoteError> {
        tracing::debug!("Saving character snapshot to {}", self.url);

        let response = self
            .http_client
            .post(&self.url)
            .json(snapshot)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        tracing::debug!("Snapshot saved");
        Ok(())
    }
}
