//! Lifecycle of a single submitted question.
//!
//! The controller moves `Idle -> Submitting -> Idle`. [`SubmissionController::begin`]
//! and [`SubmissionController::finish`] are the two edges; the event loop calls
//! them around a spawned request, while [`SubmissionController::submit`] runs
//! both inline for non-interactive callers.
//!
//! Every exit from `Submitting` clears `is_submitting`, whatever the outcome.

use std::fmt;

use tracing::{debug, warn};

use crate::core::backend::{Backend, BackendError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    input_text: String,
    is_submitting: bool,
    last_response: String,
}

impl FormState {
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn last_response(&self) -> &str {
        &self.last_response
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Submitting,
}

/// Handed out by [`SubmissionController::begin`]; the request it describes
/// must be reported back through [`SubmissionController::finish`] with the
/// same `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuestion {
    pub id: u64,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// A request is already in flight.
    Busy,
    /// The reported result belongs to a request that is no longer in flight.
    Stale,
    /// The in-flight request ended without a usable answer.
    Failed(BackendError),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Busy => write!(f, "A question is already being answered"),
            SubmitError::Stale => write!(f, "Result arrived for a request that is no longer pending"),
            SubmitError::Failed(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SubmissionController {
    form: FormState,
    in_flight: Option<u64>,
    next_id: u64,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn phase(&self) -> SubmissionPhase {
        if self.in_flight.is_some() {
            SubmissionPhase::Submitting
        } else {
            SubmissionPhase::Idle
        }
    }

    /// Replaces the draft question.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.form.input_text = text.into();
    }

    pub fn push_char(&mut self, ch: char) {
        self.form.input_text.push(ch);
    }

    pub fn pop_char(&mut self) {
        self.form.input_text.pop();
    }

    /// Starts a submission of `current_input`.
    ///
    /// Blank input is a no-op and yields `Ok(None)`. While another request is
    /// in flight this fails with [`SubmitError::Busy`] and changes nothing.
    pub fn begin(&mut self, current_input: &str) -> Result<Option<PendingQuestion>, SubmitError> {
        let question = current_input.trim();
        if question.is_empty() {
            return Ok(None);
        }
        if self.in_flight.is_some() {
            debug!("rejecting submit while a request is in flight");
            return Err(SubmitError::Busy);
        }

        if self.form.input_text != current_input {
            self.form.input_text = current_input.to_string();
        }
        self.next_id += 1;
        let id = self.next_id;
        self.in_flight = Some(id);
        self.form.is_submitting = true;
        debug!(id, "submission started");

        Ok(Some(PendingQuestion {
            id,
            question: question.to_string(),
        }))
    }

    /// Applies the terminal outcome of request `id`.
    ///
    /// On success the answer replaces `last_response` and the draft is
    /// cleared. On failure the draft is kept. Results for any id other than
    /// the one in flight are discarded with [`SubmitError::Stale`].
    pub fn finish(
        &mut self,
        id: u64,
        result: Result<String, BackendError>,
    ) -> Result<String, SubmitError> {
        if self.in_flight != Some(id) {
            debug!(id, "discarding stale submission result");
            return Err(SubmitError::Stale);
        }

        self.in_flight = None;
        self.form.is_submitting = false;

        match result {
            Ok(answer) => {
                debug!(id, "submission succeeded");
                self.form.last_response = answer.clone();
                self.form.input_text.clear();
                Ok(answer)
            }
            Err(err) => {
                warn!(id, error = %err, "submission failed");
                Err(SubmitError::Failed(err))
            }
        }
    }

    /// Abandons the in-flight request, if any. Its result will be reported
    /// as stale. Returns whether anything was in flight.
    pub fn abort(&mut self) -> bool {
        match self.in_flight.take() {
            Some(id) => {
                debug!(id, "submission aborted");
                self.form.is_submitting = false;
                true
            }
            None => false,
        }
    }

    /// Runs a full submission cycle against `backend`.
    ///
    /// Returns `Ok(None)` when `current_input` is blank and nothing was sent.
    pub async fn submit<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        current_input: &str,
    ) -> Result<Option<String>, SubmitError> {
        let Some(pending) = self.begin(current_input)? else {
            return Ok(None);
        };
        let result = backend.ask(&pending.question).await;
        self.finish(pending.id, result).map(Some)
    }
}
