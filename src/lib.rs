#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

//! Client-side synchronization core for a conversational Q&A service.
//!
//! Local state (session list, active session, active messages) tracks a
//! remote source of truth over an unreliable network. Sends apply
//! optimistically under a temporary id and reconcile by wholesale
//! replacement when the server answers.
//!
//! ```no_run
//! use qna_sync::{ChatSync, GatewayConfig, HttpGateway};
//!
//! # async fn run() -> Result<(), qna_sync::SyncError> {
//! let gateway = HttpGateway::new(&GatewayConfig::default());
//! let mut sync = ChatSync::new(gateway);
//! sync.fetch_sessions().await?;
//! let session = sync.create_session().await?;
//! sync.send_message("my answer").await?;
//! sync.delete_session(&session.id).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod normalize;
pub mod sync;

pub use config::GatewayConfig;
pub use error::{ConfigError, GatewayError, SyncError};
pub use gateway::{HttpGateway, SessionGateway};
pub use model::{Message, MessageRole, Session, SessionSummary};
pub use sync::ChatSync;
