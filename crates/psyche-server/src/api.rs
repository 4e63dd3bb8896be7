//! Wire types for the `start` and `answer` endpoints.
//!
//! Shared by the router and by [`QuizClient`](crate::client::QuizClient) so
//! both sides agree on field names.

use psyche_core::engine::AnswerOutcome;
use psyche_core::traits::QuizStep;
use serde::{Deserialize, Serialize};

pub use psyche_core::traits::SessionStart as StartResponse;

/// Body of `POST /answer`.
///
/// Both fields are optional on the wire: a missing id is an invalid session,
/// a missing value is rejected before the engine is consulted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

/// JSON error body: `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Response of `POST /answer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerResponse {
    Error(ErrorBody),
    Complete {
        complete: bool,
        result: String,
    },
    Next {
        complete: bool,
        question: String,
        progress: u32,
    },
}

impl AnswerResponse {
    pub fn error(message: impl Into<String>) -> Self {
        AnswerResponse::Error(ErrorBody::new(message))
    }
}

impl From<AnswerOutcome> for AnswerResponse {
    fn from(outcome: AnswerOutcome) -> Self {
        match outcome {
            AnswerOutcome::Next { question, progress } => AnswerResponse::Next {
                complete: false,
                question: question.to_string(),
                progress,
            },
            AnswerOutcome::Complete { result, .. } => AnswerResponse::Complete {
                complete: true,
                result,
            },
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub active_sessions: usize,
}

/// Convert a decoded answer response into a backend step.
///
/// Returns the error message when the server answered with an error body.
pub fn into_step(response: AnswerResponse) -> Result<QuizStep, String> {
    match response {
        AnswerResponse::Error(body) => Err(body.error),
        AnswerResponse::Complete { result, .. } => Ok(QuizStep::Complete { result }),
        AnswerResponse::Next {
            question, progress, ..
        } => Ok(QuizStep::Next { question, progress }),
    }
}
