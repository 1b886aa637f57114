//! Session/message synchronization core.
//!
//! Owns the client-visible state (session list, active session, active
//! message list, pending/error flags) and keeps it consistent with the
//! remote service across create/read/update/delete, including the
//! optimistic append-then-reconcile used when sending an answer.
//!
//! All five operations take `&mut self` and suspend only at the gateway
//! call; there is one writer and any number of readers through the
//! accessors. Responses apply wholesale: fetched lists replace the session
//! list, a loaded session replaces the active session and its messages in
//! one transition, and a successful send replaces the entire message list
//! with the server's authoritative version. Replacement, not merge, is what
//! retires temporary ids without reconciliation logic.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{GatewayError, SyncError};
use crate::gateway::SessionGateway;
use crate::model::{Message, MessageRole, Session, SessionSummary};
use crate::normalize::{to_message, to_session, to_session_summary};

pub struct ChatSync<G> {
    gateway: G,
    sessions: Vec<SessionSummary>,
    active_session: Option<Session>,
    active_messages: Vec<Message>,
    /// Shared by `fetch_sessions`, `create_session` and `load_session`: a
    /// single "list operation in flight" flag, not one flag per operation.
    list_loading: bool,
    send_pending: bool,
    last_error: Option<String>,
}

impl<G: SessionGateway> ChatSync<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            sessions: Vec::new(),
            active_session: None,
            active_messages: Vec::new(),
            list_loading: false,
            send_pending: false,
            last_error: None,
        }
    }

    // ─── Read accessors ──────────────────────────────────────────────────

    pub fn sessions(&self) -> &[SessionSummary] {
        &self.sessions
    }

    pub fn active_session(&self) -> Option<&Session> {
        self.active_session.as_ref()
    }

    pub fn active_messages(&self) -> &[Message] {
        &self.active_messages
    }

    pub fn list_loading(&self) -> bool {
        self.list_loading
    }

    pub fn send_pending(&self) -> bool {
        self.send_pending
    }

    /// The most recent failure's human-readable message, if any. A later
    /// success clears it only through that operation's own path.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ─── Operations ──────────────────────────────────────────────────────

    /// Replace the session list with the service's current view. The local
    /// list is untouched on failure.
    pub async fn fetch_sessions(&mut self) -> Result<(), SyncError> {
        self.list_loading = true;
        self.last_error = None;
        let result = self.gateway.list_sessions().await;
        self.list_loading = false;

        match result {
            Ok(raw) => {
                self.sessions = raw.into_iter().map(to_session_summary).collect();
                tracing::debug!(count = self.sessions.len(), "fetched sessions");
                Ok(())
            }
            Err(err) => Err(self.fail("Failed to fetch sessions", err)),
        }
    }

    /// Create a session and make it active with an empty message list. The
    /// new summary is prepended: newest-first ordering is a property of this
    /// operation, not of the fetch.
    pub async fn create_session(&mut self) -> Result<SessionSummary, SyncError> {
        self.list_loading = true;
        self.last_error = None;
        let result = self.gateway.create_session().await;
        self.list_loading = false;

        match result {
            Ok(raw) => {
                let summary = to_session_summary(raw);
                self.active_session = Some(summary.clone().into_session());
                self.active_messages.clear();
                self.sessions.insert(0, summary.clone());
                tracing::debug!(id = %summary.id, "created session");
                Ok(summary)
            }
            Err(err) => Err(self.fail("Failed to create session", err)),
        }
    }

    /// Load a session and make it active. Session identity and its message
    /// list swap together in one transition; an unknown id is reported as
    /// "Session not found", distinct from the generic load failure.
    pub async fn load_session(&mut self, id: &str) -> Result<Session, SyncError> {
        self.list_loading = true;
        self.last_error = None;
        let result = self.gateway.get_session(id).await;
        self.list_loading = false;

        match result {
            Ok(raw) => {
                let session = to_session(raw);
                self.active_messages = session.messages.clone();
                self.active_session = Some(session.clone());
                tracing::debug!(id = %session.id, messages = session.messages.len(), "loaded session");
                Ok(session)
            }
            Err(err) => {
                let message = if err.is_not_found() {
                    "Session not found"
                } else {
                    "Failed to load session"
                };
                Err(self.fail(message, err))
            }
        }
    }

    /// Send the user's answer to the active session.
    ///
    /// A no-op when there is no active session or the text is blank after
    /// trimming: no state change, no gateway call. Otherwise the message is
    /// appended optimistically under a temporary id, and on success the
    /// whole message list is replaced with the server's authoritative
    /// version (which also carries the assistant's reply). On failure the
    /// optimistic message is retracted by id, so a message appended by
    /// anything else in the meantime is not disturbed.
    pub async fn send_message(&mut self, text: &str) -> Result<(), SyncError> {
        let trimmed = text.trim();
        let Some(active) = &self.active_session else {
            return Ok(());
        };
        if trimmed.is_empty() {
            return Ok(());
        }
        let session_id = active.id.clone();

        let temp_id = format!("temp_{}", Uuid::new_v4());
        self.active_messages.push(Message {
            id: temp_id.clone(),
            role: MessageRole::User,
            content: trimmed.to_string(),
            created_at: Utc::now(),
        });

        self.send_pending = true;
        self.last_error = None;
        let result = self.gateway.post_answer(&session_id, trimmed).await;
        self.send_pending = false;

        match result {
            Ok(reply) => {
                self.active_messages = reply.messages.into_iter().map(to_message).collect();
                tracing::debug!(id = %session_id, "answer accepted");
                Ok(())
            }
            Err(err) => {
                self.active_messages.retain(|m| m.id != temp_id);
                Err(self.fail("Failed to send message", err))
            }
        }
    }

    /// Delete a session. On success the list entry is removed, and if the
    /// deleted session was active, the active session and its messages are
    /// cleared with it. Deletion failures are recorded in `last_error` but
    /// never re-raised; local state is left untouched.
    pub async fn delete_session(&mut self, id: &str) {
        self.last_error = None;
        match self.gateway.delete_session(id).await {
            Ok(()) => {
                self.sessions.retain(|s| s.id != id);
                if self.active_session.as_ref().is_some_and(|s| s.id == id) {
                    self.active_session = None;
                    self.active_messages.clear();
                }
                tracing::debug!(id = %id, "deleted session");
            }
            Err(err) => {
                self.last_error = Some("Failed to delete session".to_string());
                tracing::warn!(id = %id, error = %err, "failed to delete session");
            }
        }
    }

    fn fail(&mut self, message: &str, source: GatewayError) -> SyncError {
        self.last_error = Some(message.to_string());
        tracing::warn!(error = %source, "{message}");
        SyncError {
            message: message.to_string(),
            source,
        }
    }
}
