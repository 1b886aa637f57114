//! HTTP access to the Q&A service.
//!
//! [`SessionGateway`] is the seam between the synchronization core and the
//! network: the core is generic over it, so tests can inject failures
//! without a server. [`HttpGateway`] is the real implementation over
//! reqwest.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::normalize::{AnswerReply, RawSession, RawSessionSummary};

/// The five operations the service exposes. Responses are raw wire records;
/// normalization happens in the core, not here.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    async fn list_sessions(&self) -> Result<Vec<RawSessionSummary>, GatewayError>;

    async fn create_session(&self) -> Result<RawSessionSummary, GatewayError>;

    /// Fetch a session with its full ordered message list. An unknown id is
    /// `GatewayError::NotFound`.
    async fn get_session(&self, id: &str) -> Result<RawSession, GatewayError>;

    /// Post the user's answer; the reply carries the session's updated
    /// message list (persisted user message plus the generated assistant
    /// reply).
    async fn post_answer(&self, id: &str, answer: &str) -> Result<AnswerReply, GatewayError>;

    async fn delete_session(&self, id: &str) -> Result<(), GatewayError>;
}

#[derive(Debug, Serialize)]
struct AnswerRequest<'a> {
    #[serde(rename = "userAnswer")]
    user_answer: &'a str,
}

pub struct HttpGateway {
    base_url: String,
    client: Client,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: build_gateway_client(),
        }
    }

    fn sessions_url(&self) -> String {
        format!("{}/api/sessions/", self.base_url)
    }

    fn session_url(&self, id: &str) -> String {
        format!("{}/api/sessions/{id}", self.base_url)
    }

    fn answer_url(&self, id: &str) -> String {
        format!("{}/api/sessions/{id}/answer", self.base_url)
    }
}

pub fn build_gateway_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_else(|_| Client::new())
}

fn check_status(status: StatusCode) -> Result<(), GatewayError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(GatewayError::Status {
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl SessionGateway for HttpGateway {
    async fn list_sessions(&self) -> Result<Vec<RawSessionSummary>, GatewayError> {
        let response = self.client.get(self.sessions_url()).send().await?;
        check_status(response.status())?;
        Ok(response.json().await?)
    }

    async fn create_session(&self) -> Result<RawSessionSummary, GatewayError> {
        let response = self.client.post(self.sessions_url()).send().await?;
        check_status(response.status())?;
        Ok(response.json().await?)
    }

    async fn get_session(&self, id: &str) -> Result<RawSession, GatewayError> {
        let response = self.client.get(self.session_url(id)).send().await?;
        // Only this operation classifies 404: the core reports it with a
        // distinguished message.
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(id.to_string()));
        }
        check_status(response.status())?;
        Ok(response.json().await?)
    }

    async fn post_answer(&self, id: &str, answer: &str) -> Result<AnswerReply, GatewayError> {
        let response = self
            .client
            .post(self.answer_url(id))
            .json(&AnswerRequest {
                user_answer: answer,
            })
            .send()
            .await?;
        check_status(response.status())?;
        Ok(response.json().await?)
    }

    async fn delete_session(&self, id: &str) -> Result<(), GatewayError> {
        let response = self.client.delete(self.session_url(id)).send().await?;
        check_status(response.status())
    }
}
