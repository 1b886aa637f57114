//! Canonical client-side shapes for sessions and messages.
//!
//! These are what the synchronization core stores and what callers read.
//! Raw wire records (see [`crate::normalize`]) are mapped into these types
//! before they touch any state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message. Never mutated after creation; rendering decisions
/// key off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// Lenient wire parsing. The service only emits `"user"` and
    /// `"assistant"`, but an unrecognized role must not fail normalization,
    /// so anything that is not literally "assistant" reads as `User`.
    pub fn parse_lenient(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("assistant") {
            Self::Assistant
        } else {
            Self::User
        }
    }
}

/// One message in a conversation. `id` may be a client-generated temporary
/// id during the optimistic window of an in-flight send; it never survives
/// past that send's resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A session as it appears in list context: identity only, no messages
/// loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

impl SessionSummary {
    /// Promote to a full session whose messages have not been loaded yet.
    pub fn into_session(self) -> Session {
        Session {
            id: self.id,
            created_at: self.created_at,
            messages: Vec::new(),
        }
    }
}

/// A fully loaded session. Message order is conversation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}
