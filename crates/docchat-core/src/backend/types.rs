//! Wire types for the backend HTTP contract.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Body for `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

/// Successful `POST /chat` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub session_id: Option<String>,
    /// Naive ISO 8601 timestamp as emitted by the backend. Kept raw on the
    /// wire so an unexpected format never fails the whole reply.
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ChatReply {
    /// The reply timestamp, if present and parseable.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp.as_deref().and_then(|raw| raw.parse().ok())
    }
}

/// Successful `GET /documents/` response.
///
/// Only `files` feeds session state; the stats fields are display-only.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentListing {
    pub files: Vec<String>,
    #[serde(default)]
    pub total_files: Option<u64>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub index_size: Option<u64>,
}

/// Upload acknowledgement from `POST /upload/`. Logged, never displayed.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub files_processed: Option<u64>,
    #[serde(default)]
    pub files: Vec<String>,
}
