//! Session engine: the quiz state machine.
//!
//! Owns every active session and advances them one answer at a time. Each
//! operation holds the session map lock for its whole read-modify-write, so
//! concurrent submissions against the same id are applied one after another.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::SessionError;
use crate::model::{progress_percent, QUESTIONS, QUESTION_COUNT};
use crate::narrative::build_narrative;
use crate::statistics::{AxisScores, Profile};
use crate::traits::{QuizBackend, QuizStep, SessionStart};

/// Progress of one respondent through the question bank.
#[derive(Debug, Clone)]
struct Session {
    /// Equals `scores.total()` at all times.
    current_index: usize,
    scores: AxisScores,
    last_touched: DateTime<Utc>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            current_index: 0,
            scores: AxisScores::new(),
            last_touched: now,
        }
    }
}

/// Result of a successful [`SessionEngine::submit_answer`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// The next question and the floored completion percentage.
    Next {
        question: &'static str,
        progress: u32,
    },
    /// All questions answered; the session has been removed.
    Complete { result: String, profile: Profile },
}

impl From<AnswerOutcome> for QuizStep {
    fn from(outcome: AnswerOutcome) -> Self {
        match outcome {
            AnswerOutcome::Next { question, progress } => QuizStep::Next {
                question: question.to_string(),
                progress,
            },
            AnswerOutcome::Complete { result, .. } => QuizStep::Complete { result },
        }
    }
}

/// The session engine. Construct one per process and share it.
#[derive(Debug, Default)]
pub struct SessionEngine {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        // Every mutation completes before the guard drops, so a poisoned map is
        // still consistent.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a session and return its id with the first question.
    pub fn start_session(&self) -> SessionStart {
        let mut sessions = self.lock();
        let session_id = loop {
            let candidate = Uuid::new_v4().to_string();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        sessions.insert(session_id.clone(), Session::new(Utc::now()));
        tracing::debug!(session_id = %session_id, active = sessions.len(), "session started");

        SessionStart {
            session_id,
            question: QUESTIONS[0].text.to_string(),
            progress: 0,
        }
    }

    /// Record a rating for the session's current question.
    ///
    /// The rating is folded into the averages unchanged; range checks belong
    /// to the caller. Unknown ids fail with [`SessionError::InvalidSession`]
    /// before anything is touched.
    pub fn submit_answer(
        &self,
        session_id: &str,
        value: f64,
    ) -> Result<AnswerOutcome, SessionError> {
        let mut sessions = self.lock();
        let Some(session) = sessions.get_mut(session_id) else {
            tracing::warn!(session_id = %session_id, "answer for unknown session");
            return Err(SessionError::InvalidSession);
        };

        let axis = QUESTIONS[session.current_index].axis;
        session.scores.record(axis, value);
        session.current_index += 1;
        session.last_touched = Utc::now();

        if session.current_index >= QUESTION_COUNT {
            let profile = Profile::from_scores(&session.scores);
            let result = build_narrative(&profile);
            sessions.remove(session_id);
            tracing::info!(
                session_id = %session_id,
                dominant = %profile.dominant,
                lowest = %profile.lowest,
                stability = profile.stability,
                "session complete"
            );
            return Ok(AnswerOutcome::Complete { result, profile });
        }

        Ok(AnswerOutcome::Next {
            question: QUESTIONS[session.current_index].text,
            progress: progress_percent(session.current_index),
        })
    }

    /// Number of sessions currently in progress.
    pub fn active_sessions(&self) -> usize {
        self.lock().len()
    }

    /// Questions answered so far by an active session.
    pub fn answered(&self, session_id: &str) -> Option<usize> {
        self.lock().get(session_id).map(|s| s.current_index)
    }

    /// Drop sessions idle for longer than `ttl`. Returns how many were removed.
    pub fn sweep_expired(&self, ttl: Duration) -> usize {
        self.sweep_expired_at(Utc::now(), ttl)
    }

    /// [`sweep_expired`](Self::sweep_expired) against an explicit clock.
    pub fn sweep_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, s| now.signed_duration_since(s.last_touched) <= ttl);
        before - sessions.len()
    }

    #[cfg(test)]
    fn backdate(&self, session_id: &str, by: Duration) {
        if let Some(s) = self.lock().get_mut(session_id) {
            s.last_touched -= by;
        }
    }
}

#[async_trait]
impl QuizBackend for SessionEngine {
    fn name(&self) -> &str {
        "local"
    }

    async fn start(&self) -> anyhow::Result<SessionStart> {
        Ok(self.start_session())
    }

    async fn answer(&self, session_id: &str, value: f64) -> anyhow::Result<QuizStep> {
        Ok(self.submit_answer(session_id, value)?.into())
    }
}
