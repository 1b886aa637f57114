use thiserror::Error;

// ─── Gateway errors ──────────────────────────────────────────────────────────

/// Errors raised by the HTTP gateway layer.
///
/// `NotFound` is split out because the synchronization core reports it with
/// a distinguished message; every other failure is generic from the caller's
/// point of view.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("session not found: {0}")]
    NotFound(String),

    #[error("server returned status {status}")]
    Status { status: u16 },

    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
}

impl GatewayError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

// ─── Synchronization errors ──────────────────────────────────────────────────

/// Error re-raised by the synchronization core. `message` is the same
/// human-readable text recorded in `last_error`; the gateway cause rides
/// along as the source.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SyncError {
    pub message: String,
    #[source]
    pub source: GatewayError,
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
