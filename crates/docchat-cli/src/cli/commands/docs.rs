//! Document listing and deletion commands.

use anyhow::{Result, bail};
use docchat_core::session::Session;
use docchat_core::session::state::SessionState;

pub async fn list(session: &mut Session) -> Result<()> {
    if !session.list_documents().await {
        bail!("Failed to fetch documents from the backend");
    }
    print_documents(session.state());
    Ok(())
}

pub async fn delete(session: &mut Session, name: &str) -> Result<()> {
    if !session.delete_document(name).await {
        bail!("Failed to delete {name}");
    }
    println!("Deleted {name}");
    print_documents(session.state());
    Ok(())
}

pub(crate) fn print_documents(state: &SessionState) {
    if state.uploads.is_empty() {
        println!("No documents uploaded yet.");
        return;
    }

    println!("Uploaded documents:");
    for record in &state.uploads {
        println!("  {}", record.display_name());
    }
}
