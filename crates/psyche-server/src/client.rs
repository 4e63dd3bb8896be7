//! HTTP client for a running psyche server.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use psyche_core::traits::{QuizBackend, QuizStep, SessionStart};
use psyche_core::SessionError;

use crate::api::{into_step, AnswerRequest, AnswerResponse};
use crate::error::ClientError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Quiz backend that talks to a psyche server over HTTP.
pub struct QuizClient {
    base_url: String,
    client: reqwest::Client,
}

impl QuizClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /start`.
    pub async fn start_session(&self) -> Result<SessionStart, ClientError> {
        let response = self
            .client
            .post(format!("{}/start", self.base_url))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// `POST /answer`.
    pub async fn submit_answer(
        &self,
        session_id: &str,
        value: f64,
    ) -> Result<QuizStep, ClientError> {
        let request = AnswerRequest {
            session_id: Some(session_id.to_string()),
            value: Some(value),
        };
        let response = self
            .client
            .post(format!("{}/answer", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let decoded = match serde_json::from_str::<AnswerResponse>(&body) {
            Ok(decoded) => decoded,
            Err(e) if status.is_success() => return Err(ClientError::Decode(e.to_string())),
            Err(_) => {
                return Err(ClientError::Rejected {
                    status: status.as_u16(),
                    message: body,
                })
            }
        };

        into_step(decoded).map_err(|message| {
            if message == SessionError::InvalidSession.to_string() {
                ClientError::InvalidSession
            } else {
                ClientError::Rejected {
                    status: status.as_u16(),
                    message,
                }
            }
        })
    }
}

#[async_trait]
impl QuizBackend for QuizClient {
    fn name(&self) -> &str {
        "remote"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn start(&self) -> anyhow::Result<SessionStart> {
        Ok(self.start_session().await?)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn answer(&self, session_id: &str, value: f64) -> anyhow::Result<QuizStep> {
        Ok(self.submit_answer(session_id, value).await?)
    }
}
