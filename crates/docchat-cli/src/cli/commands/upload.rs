//! Upload command handler.

use std::path::{Path, PathBuf};

use anyhow::Result;
use docchat_core::documents::OutgoingDocument;
use docchat_core::session::{Session, UploadStatus};

use super::docs;

pub async fn run(session: &mut Session, files: &[PathBuf]) -> Result<()> {
    let mut any_uploaded = false;
    for path in files {
        if matches!(upload_one(session, path).await, UploadStatus::Uploaded) {
            any_uploaded = true;
        }
    }

    if any_uploaded {
        docs::print_documents(session.state());
    }
    Ok(())
}

/// Uploads a single file, printing the outcome.
///
/// Failures are alerts, not errors: the session stays usable and the command
/// moves on to the next file.
pub(crate) async fn upload_one(session: &mut Session, path: &Path) -> UploadStatus {
    let document = match OutgoingDocument::from_path(path) {
        Ok(document) => document,
        Err(err) => {
            eprintln!("Could not read {}: {err:#}", path.display());
            return UploadStatus::Failed;
        }
    };

    let status = session.upload_document(document).await;
    match status {
        UploadStatus::Rejected => {
            eprintln!("Only PDF, DOC, DOCX, PPTX, and CSV files are allowed.");
        }
        UploadStatus::Failed => eprintln!("Upload failed!"),
        UploadStatus::Uploaded => {
            if let Some(name) = session.state().selected_file.as_deref() {
                println!("Uploaded {name}");
            }
        }
    }
    status
}
