//! Pure mapping from raw wire records to canonical model types.
//!
//! The service emits `createdAt` as an ISO-like string (FastAPI-style naive
//! datetimes, no offset); numeric epoch seconds are also accepted.
//! Normalization is total: any record carrying an `id` maps to a valid
//! entity, and a timestamp that cannot be interpreted falls back to the
//! current time instead of failing the whole payload. An approximately
//! correct timestamp beats a broken render.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::model::{Message, MessageRole, Session, SessionSummary};

/// A message as the service sends it. `created_at` stays a raw JSON value
/// so that no timestamp shape can fail deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    pub id: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Value,
}

/// A session list entry as the service sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSessionSummary {
    pub id: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Value,
}

/// A fully loaded session as the service sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSession {
    pub id: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Value,
    #[serde(default)]
    pub messages: Vec<RawMessage>,
}

/// Reply to the answer endpoint: the service's feedback text plus the
/// session's updated message list. The synchronization core consumes only
/// `messages`; `feedback` is carried through for callers that want it.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerReply {
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub messages: Vec<RawMessage>,
}

pub fn to_message(raw: RawMessage) -> Message {
    Message {
        id: raw.id,
        role: MessageRole::parse_lenient(&raw.role),
        content: raw.content,
        created_at: parse_created_at(&raw.created_at),
    }
}

pub fn to_session_summary(raw: RawSessionSummary) -> SessionSummary {
    SessionSummary {
        id: raw.id,
        created_at: parse_created_at(&raw.created_at),
    }
}

/// Maps every raw message in order; message order is conversation order.
pub fn to_session(raw: RawSession) -> Session {
    Session {
        id: raw.id,
        created_at: parse_created_at(&raw.created_at),
        messages: raw.messages.into_iter().map(to_message).collect(),
    }
}

/// Interpret a wire timestamp. Anything that is not an RFC 3339 string, a
/// naive ISO datetime, or epoch seconds yields `Utc::now()`.
fn parse_created_at(value: &Value) -> DateTime<Utc> {
    match value {
        Value::String(s) => parse_date_str(s).unwrap_or_else(Utc::now),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .unwrap_or_else(Utc::now),
        _ => Utc::now(),
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // FastAPI serializes naive datetimes without an offset.
    s.parse::<NaiveDateTime>()
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}
