//! HTTP client wrapping the backend's chat, upload, and document routes.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use super::error::{BackendError, BackendResult};
use super::types::{ChatReply, ChatRequest, DocumentListing, UploadReceipt};
use crate::documents::OutgoingDocument;

/// Default base URL for the backend service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Resolves the backend base URL.
///
/// Precedence: explicit override (CLI flag) > `DOCCHAT_BASE_URL` env var >
/// config file > default.
///
/// # Errors
/// Returns an error if the selected URL is not well-formed.
pub fn resolve_base_url(
    override_url: Option<&str>,
    config_base_url: Option<&str>,
) -> Result<String> {
    if let Some(explicit) = override_url {
        let trimmed = explicit.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    if let Ok(env_url) = std::env::var("DOCCHAT_BASE_URL") {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    if let Some(config_url) = config_base_url {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    Ok(DEFAULT_BASE_URL.to_string())
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid backend base URL: {url}"))?;
    Ok(())
}

/// Backend API client.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client for `base_url`.
    ///
    /// `timeout` bounds every request; `None` leaves requests unbounded.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a chat message and returns the bot reply.
    pub async fn send_chat(
        &self,
        message: &str,
        session_id: Option<&str>,
    ) -> BackendResult<ChatReply> {
        let request = ChatRequest {
            message,
            session_id,
        };
        let response = self
            .http
            .post(format!("{}/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|err| BackendError::from_reqwest(&err))?;

        decode(response).await
    }

    /// Uploads a document as a multipart form (field `files`).
    pub async fn upload_document(
        &self,
        document: OutgoingDocument,
    ) -> BackendResult<UploadReceipt> {
        let OutgoingDocument {
            file_name,
            mime_type,
            bytes,
        } = document;

        let mut part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        if let Some(mime) = mime_type {
            part = part
                .mime_str(mime)
                .map_err(|_| BackendError::build(format!("Invalid MIME type: {mime}")))?;
        }
        let form = reqwest::multipart::Form::new().part("files", part);

        let response = self
            .http
            .post(format!("{}/upload/", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|err| BackendError::from_reqwest(&err))?;

        decode(response).await
    }

    /// Fetches the stored-document listing.
    pub async fn list_documents(&self) -> BackendResult<DocumentListing> {
        let response = self
            .http
            .get(format!("{}/documents/", self.base_url))
            .send()
            .await
            .map_err(|err| BackendError::from_reqwest(&err))?;

        decode(response).await
    }

    /// Deletes a document by its stored name.
    pub async fn delete_document(&self, stored_name: &str) -> BackendResult<()> {
        let response = self
            .http
            .delete(format!("{}/documents/{stored_name}", self.base_url))
            .send()
            .await
            .map_err(|err| BackendError::from_reqwest(&err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::http_status(status.as_u16(), &body));
        }
        Ok(())
    }
}

/// Decodes a JSON response, mapping non-2xx statuses to `HttpStatus` errors.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> BackendResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BackendError::http_status(status.as_u16(), &body));
    }

    response
        .json()
        .await
        .map_err(|err| BackendError::parse(&err))
}
