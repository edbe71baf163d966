//! Interactive chat REPL.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;
use docchat_core::session::{SendStatus, Session};

use super::{docs, upload};

pub async fn run(session: &mut Session) -> Result<()> {
    println!("DocChat (chat with your uploaded documents)");
    println!("Type a question, :upload <path> to add a document, :docs to list, :q to quit.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if input == ":q" {
            break;
        }
        if input == ":docs" {
            if session.list_documents().await {
                docs::print_documents(session.state());
            } else {
                eprintln!("Error fetching documents.");
            }
            continue;
        }
        if input == ":upload" {
            eprintln!("Usage: :upload <path>");
            continue;
        }
        if let Some(rest) = input.strip_prefix(":upload ") {
            upload::upload_one(session, Path::new(rest.trim())).await;
            continue;
        }

        // Mirror the input-buffer flow: stage the draft, then submit it.
        session.set_draft(&line);
        let text = session.state().draft.clone();
        match session.send_message(&text).await {
            SendStatus::Ignored => {}
            SendStatus::Replied | SendStatus::Failed => {
                if let Some(reply) = session.state().transcript.last() {
                    println!("{}", reply.text);
                }
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
