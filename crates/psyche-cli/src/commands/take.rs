//! The `psyche take` command.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use psyche_core::engine::SessionEngine;
use psyche_core::model::check_rating;
use psyche_core::traits::{QuizBackend, QuizStep};
use psyche_core::SessionError;
use psyche_server::{ClientError, QuizClient};

use super::score::parse_answers;

/// Where ratings come from.
pub enum AnswerSource<R> {
    /// Pre-supplied ratings, consumed in order.
    Scripted(VecDeque<f64>),
    /// Ratings typed one per line.
    Interactive(R),
}

impl<R: BufRead> AnswerSource<R> {
    fn next_rating(&mut self, out: &mut impl Write) -> Result<f64> {
        match self {
            AnswerSource::Scripted(queue) => {
                let value = queue
                    .pop_front()
                    .context("ran out of answers before the quiz was complete")?;
                writeln!(out, "> {value}")?;
                Ok(value)
            }
            AnswerSource::Interactive(reader) => loop {
                write!(out, "Your rating (1-5): ")?;
                out.flush()?;

                let mut line = String::new();
                if reader.read_line(&mut line)? == 0 {
                    anyhow::bail!("input ended before the quiz was complete");
                }
                match line.trim().parse::<f64>().map(check_rating) {
                    Ok(Ok(value)) => return Ok(value),
                    _ => writeln!(out, "Please enter a number from 1 to 5.")?,
                }
            },
        }
    }
}

/// How many times a lost session is replaced before giving up.
const MAX_RESTARTS: usize = 2;

/// Whether an answer failed because the backend no longer knows the session.
fn session_lost(err: &anyhow::Error) -> bool {
    if let Some(e) = err.downcast_ref::<ClientError>() {
        return e.requires_restart();
    }
    err.downcast_ref::<SessionError>()
        .is_some_and(SessionError::requires_restart)
}

/// Drive one quiz to completion and return the narrative.
///
/// If the session expires mid-quiz, a new one is started and the ratings
/// already given are replayed onto it before asking for more.
pub async fn run_quiz<R: BufRead>(
    backend: &dyn QuizBackend,
    answers: &mut AnswerSource<R>,
    out: &mut impl Write,
) -> Result<String> {
    let mut given = Vec::new();
    let mut restarts = 0;
    loop {
        match run_session(backend, &mut given, &mut *answers, &mut *out).await {
            Ok(result) => return Ok(result),
            Err(e) if session_lost(&e) && restarts < MAX_RESTARTS => {
                restarts += 1;
                tracing::warn!(
                    backend = backend.name(),
                    answered = given.len(),
                    "session lost, restarting"
                );
                writeln!(out, "\nSession expired. Restoring your answers on a new session.")?;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn run_session<R: BufRead>(
    backend: &dyn QuizBackend,
    given: &mut Vec<f64>,
    answers: &mut AnswerSource<R>,
    out: &mut impl Write,
) -> Result<String> {
    let start = backend.start().await?;
    tracing::debug!(backend = backend.name(), session_id = %start.session_id, "quiz started");

    let mut replay = given.clone().into_iter();
    let mut question = start.question;
    let mut progress = start.progress;
    loop {
        let value = match replay.next() {
            Some(value) => value,
            None => {
                writeln!(out, "\n[{progress:>3}%] {question}")?;
                let value = answers.next_rating(out)?;
                given.push(value);
                value
            }
        };

        match backend.answer(&start.session_id, value).await? {
            QuizStep::Next {
                question: next,
                progress: pct,
            } => {
                question = next;
                progress = pct;
            }
            QuizStep::Complete { result } => return Ok(result),
        }
    }
}

pub async fn execute(server: Option<String>, answers: Option<String>) -> Result<()> {
    let backend: Box<dyn QuizBackend> = match &server {
        Some(url) => {
            let client = QuizClient::new(url)?;
            tracing::info!(server = client.base_url(), "taking the quiz against a remote server");
            Box::new(client)
        }
        None => Box::new(SessionEngine::new()),
    };

    let stdin = io::stdin();
    let mut source = match answers {
        Some(list) => AnswerSource::Scripted(parse_answers(&list)?.into()),
        None => AnswerSource::Interactive(stdin.lock()),
    };

    let mut stdout = io::stdout();
    let result = run_quiz(backend.as_ref(), &mut source, &mut stdout).await?;

    println!("\n{result}");
    Ok(())
}
