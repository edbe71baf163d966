//! One-shot question command.

use anyhow::{Result, bail};
use docchat_core::session::{SendStatus, Session};

pub async fn run(session: &mut Session, prompt: &str) -> Result<()> {
    match session.send_message(prompt).await {
        SendStatus::Ignored => bail!("Prompt is empty"),
        SendStatus::Replied | SendStatus::Failed => {
            // On failure the transcript already carries the fallback line.
            if let Some(reply) = session.state().transcript.last() {
                println!("{}", reply.text);
            }
            Ok(())
        }
    }
}
