//! Session driver.
//!
//! [`Session`] owns the session state, the backend client, the request id
//! counter, and the session UUID. Each operation performs its backend call
//! and applies the outcome through the reducer in [`state`].

pub mod state;

use uuid::Uuid;

use crate::backend::{BackendClient, BackendError, BackendErrorKind};
use crate::documents::{self, OutgoingDocument};
use state::{RequestSeq, SessionEvent, SessionState, update};

/// Outcome of a chat send, for presentation-layer logging only.
///
/// The transcript already carries the user-visible result in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    /// Whitespace-only input; nothing happened.
    Ignored,
    /// The bot reply was appended.
    Replied,
    /// The fallback message was appended.
    Failed,
}

/// Outcome of an upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    /// MIME type outside the allow-list; no request was sent.
    Rejected,
    /// Backend accepted the document.
    Uploaded,
    /// Request failed; the document set is unchanged.
    Failed,
}

/// A chat/upload session against one backend.
pub struct Session {
    backend: BackendClient,
    state: SessionState,
    seq: RequestSeq,
    session_id: String,
}

impl Session {
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            state: SessionState::default(),
            seq: RequestSeq::default(),
            session_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The UUID sent with every chat request to scope backend history.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Replaces the pending input buffer.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        update(
            &mut self.state,
            SessionEvent::DraftChanged { text: text.into() },
        );
    }

    /// Sends a chat message; whitespace-only input is a no-op.
    ///
    /// The transcript always receives the outcome: the bot reply on success,
    /// the generic fallback line on any failure. The pending flag returns to
    /// idle in every branch.
    pub async fn send_message(&mut self, text: &str) -> SendStatus {
        if text.trim().is_empty() {
            return SendStatus::Ignored;
        }

        let request = self.seq.next_id();
        update(
            &mut self.state,
            SessionEvent::MessageSubmitted {
                request,
                text: text.to_string(),
            },
        );

        match self.backend.send_chat(text, Some(&self.session_id)).await {
            Ok(reply) => {
                if let Some(timestamp) = reply.timestamp() {
                    tracing::debug!(request = request.0, %timestamp, "bot reply received");
                }
                update(
                    &mut self.state,
                    SessionEvent::ReplyReceived {
                        request,
                        text: reply.response,
                    },
                );
                SendStatus::Replied
            }
            Err(err) => {
                tracing::warn!(request = request.0, kind = %err.kind, error = %err, "chat request failed");
                update(&mut self.state, SessionEvent::ReplyFailed { request });
                SendStatus::Failed
            }
        }
    }

    /// Uploads a document after checking the MIME allow-list.
    ///
    /// A rejected document produces no request and no state change. After a
    /// successful upload the document set is rebuilt from the backend's
    /// listing; a refresh failure keeps the stale set without demoting the
    /// upload outcome.
    pub async fn upload_document(&mut self, document: OutgoingDocument) -> UploadStatus {
        let allowed = document.mime_type.is_some_and(documents::is_allowed_mime);
        if !allowed {
            tracing::warn!(
                file = %document.file_name,
                mime = document.mime_type.unwrap_or("unknown"),
                "unsupported file type"
            );
            return UploadStatus::Rejected;
        }

        update(
            &mut self.state,
            SessionEvent::FileSelected {
                name: document.file_name.clone(),
            },
        );

        match self.backend.upload_document(document).await {
            Ok(receipt) => {
                tracing::debug!(
                    message = receipt.message.as_deref().unwrap_or(""),
                    files_processed = receipt.files_processed.unwrap_or_default(),
                    "upload accepted"
                );
                self.list_documents().await;
                UploadStatus::Uploaded
            }
            Err(err) => {
                log_upload_failure(&err);
                UploadStatus::Failed
            }
        }
    }

    /// Refreshes the upload set from the backend listing (full replace).
    ///
    /// Returns false on failure, leaving the previous set untouched.
    pub async fn list_documents(&mut self) -> bool {
        match self.backend.list_documents().await {
            Ok(listing) => {
                tracing::debug!(count = listing.files.len(), "document listing fetched");
                update(
                    &mut self.state,
                    SessionEvent::DocumentsLoaded {
                        files: listing.files,
                    },
                );
                true
            }
            Err(err) => {
                tracing::warn!(kind = %err.kind, error = %err, "failed to fetch documents");
                false
            }
        }
    }

    /// Deletes a stored document and refreshes the listing.
    pub async fn delete_document(&mut self, stored_name: &str) -> bool {
        match self.backend.delete_document(stored_name).await {
            Ok(()) => {
                self.list_documents().await;
                true
            }
            Err(err) => {
                tracing::warn!(file = stored_name, kind = %err.kind, error = %err, "failed to delete document");
                false
            }
        }
    }
}

/// Upload failures keep one user-visible shape but log their actual cause.
fn log_upload_failure(err: &BackendError) {
    match err.kind {
        BackendErrorKind::HttpStatus => {
            tracing::warn!(error = %err, details = err.details.as_deref().unwrap_or(""), "backend rejected upload");
        }
        BackendErrorKind::Timeout | BackendErrorKind::Transport => {
            tracing::warn!(error = %err, "no response to upload request");
        }
        BackendErrorKind::Build | BackendErrorKind::Parse => {
            tracing::warn!(error = %err, "upload request could not be completed");
        }
    }
}
