//! Session state and reducer.
//!
//! All mutations of [`SessionState`] happen in [`update`]. The async driver
//! in [`crate::session`] performs the backend I/O and feeds outcomes back
//! here as events, so there is exactly one place where the transcript, the
//! upload set, and the pending flag can change.

use crate::documents::UploadRecord;

/// Fallback bot message appended when a chat request fails.
pub const FALLBACK_REPLY: &str = "Oops! Something went wrong.";

/// Correlation id for an outbound chat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

/// Monotonically increasing request id allocator.
#[derive(Debug, Default)]
pub struct RequestSeq {
    next: u64,
}

impl RequestSeq {
    pub fn next_id(&mut self) -> RequestId {
        let id = RequestId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

/// One transcript entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
        }
    }
}

/// Outstanding chat request tracking.
///
/// At most one request is tracked at a time. Settling any chat request
/// returns to `Idle`, whether or not it is the tracked one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pending {
    #[default]
    Idle,
    AwaitingReply {
        request: RequestId,
    },
}

impl Pending {
    pub fn is_awaiting(&self) -> bool {
        matches!(self, Pending::AwaitingReply { .. })
    }
}

/// Session-visible state: input draft, transcript, and upload set.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Pending input buffer, cleared on submission.
    pub draft: String,
    /// Ordered chat transcript (append-only, arrival order).
    pub transcript: Vec<Message>,
    /// Client-side reflection of the backend's stored documents.
    pub uploads: Vec<UploadRecord>,
    /// Outstanding chat request flag.
    pub pending: Pending,
    /// Display name of the most recently accepted upload candidate.
    pub selected_file: Option<String>,
}

/// Events that mutate [`SessionState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The input draft changed.
    DraftChanged { text: String },
    /// A user message was submitted and its request dispatched.
    MessageSubmitted { request: RequestId, text: String },
    /// A chat request resolved with a bot reply.
    ReplyReceived { request: RequestId, text: String },
    /// A chat request settled without a usable reply.
    ReplyFailed { request: RequestId },
    /// An upload candidate passed the allow-list.
    FileSelected { name: String },
    /// The backend listing was fetched.
    DocumentsLoaded { files: Vec<String> },
}

/// The single mutation entry point for session state.
pub fn update(state: &mut SessionState, event: SessionEvent) {
    match event {
        SessionEvent::DraftChanged { text } => state.draft = text,
        SessionEvent::MessageSubmitted { request, text } => {
            state.transcript.push(Message::user(text));
            state.draft.clear();
            state.pending = Pending::AwaitingReply { request };
        }
        SessionEvent::ReplyReceived { request, text } => {
            if state.pending != (Pending::AwaitingReply { request }) {
                tracing::debug!(request = request.0, "reply settled an untracked request");
            }
            state.transcript.push(Message::bot(text));
            state.pending = Pending::Idle;
        }
        SessionEvent::ReplyFailed { request } => {
            tracing::debug!(request = request.0, "chat request settled without a reply");
            state.transcript.push(Message::bot(FALLBACK_REPLY));
            state.pending = Pending::Idle;
        }
        SessionEvent::FileSelected { name } => state.selected_file = Some(name),
        SessionEvent::DocumentsLoaded { files } => {
            // Full replace, never a merge: the backend listing is authoritative.
            state.uploads = files.into_iter().map(UploadRecord::new).collect();
        }
    }
}
