//! HTTP client for the external document-chat backend.

mod client;
mod error;
mod types;

pub use client::{BackendClient, DEFAULT_BASE_URL, resolve_base_url};
pub use error::{BackendError, BackendErrorKind, BackendResult};
pub use types::{ChatReply, ChatRequest, DocumentListing, UploadReceipt};
