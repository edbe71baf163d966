//! Upload validation and document naming.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// MIME types the backend accepts for upload.
///
/// Checked client-side before any request is sent.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "text/csv",
];

/// Returns true if `mime` is in the upload allow-list.
pub fn is_allowed_mime(mime: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mime)
}

/// Returns the MIME type for a document file, inferred from its extension.
pub fn mime_type_for_document(path: &Path) -> Option<&'static str> {
    let ext = path.extension().and_then(|e| e.to_str())?;

    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        "pptx" => {
            Some("application/vnd.openxmlformats-officedocument.presentationml.presentation")
        }
        "csv" => Some("text/csv"),
        _ => None,
    }
}

/// Strips the backend's `<id>_` prefix from a stored filename.
///
/// Splits on the first `_` only; the remainder is kept verbatim. A name
/// without an underscore is returned unchanged.
pub fn display_name(stored_name: &str) -> &str {
    stored_name
        .split_once('_')
        .map_or(stored_name, |(_, rest)| rest)
}

/// A backend-stored document as reflected by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    stored_name: String,
}

impl UploadRecord {
    pub fn new(stored_name: impl Into<String>) -> Self {
        Self {
            stored_name: stored_name.into(),
        }
    }

    /// The filename as stored by the backend (unique `<id>_` prefix included).
    pub fn stored_name(&self) -> &str {
        &self.stored_name
    }

    /// The user-facing name with the `<id>_` prefix stripped.
    pub fn display_name(&self) -> &str {
        display_name(&self.stored_name)
    }
}

/// A local file staged for upload.
#[derive(Debug, Clone)]
pub struct OutgoingDocument {
    pub file_name: String,
    pub mime_type: Option<&'static str>,
    pub bytes: Vec<u8>,
}

impl OutgoingDocument {
    /// Reads a file from disk and derives its upload name and MIME type.
    ///
    /// # Errors
    /// Returns an error if the path has no usable filename or cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("Invalid file name: {}", path.display()))?
            .to_string();

        let bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

        Ok(Self {
            file_name,
            mime_type: mime_type_for_document(path),
            bytes,
        })
    }
}
