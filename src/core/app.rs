//! State of one interactive session.
//!
//! Greeting and form state are kept as separate owned values; the event loop
//! feeds user intents and [`BackendEvent`]s in and reads the result back out
//! for rendering.

use std::time::Instant;

use crate::core::greeting::GreetingState;
use crate::core::request_service::BackendEvent;
use crate::core::submission::{PendingQuestion, SubmissionController, SubmitError};

pub const FAILURE_NOTICE: &str = "Something went wrong!";
pub const BUSY_STATUS: &str = "Still waiting for the previous answer";

pub struct App {
    pub greeting: GreetingState,
    pub submission: SubmissionController,
    /// Blocking failure notice; input is ignored until it is dismissed.
    pub notice: Option<String>,
    pub status: Option<String>,
    pub base_url: String,
    pub exit_requested: bool,
    pub pulse_start: Instant,
}

impl App {
    pub fn new(base_url: String) -> Self {
        Self {
            greeting: GreetingState::new(),
            submission: SubmissionController::new(),
            notice: None,
            status: None,
            base_url,
            exit_requested: false,
            pulse_start: Instant::now(),
        }
    }

    /// Starts submitting the current draft. Returns the request the caller
    /// must dispatch, if any.
    pub fn submit_current(&mut self) -> Option<PendingQuestion> {
        let draft = self.submission.form().input_text().to_string();
        match self.submission.begin(&draft) {
            Ok(Some(pending)) => {
                self.status = None;
                self.pulse_start = Instant::now();
                Some(pending)
            }
            Ok(None) => None,
            Err(SubmitError::Busy) => {
                self.status = Some(BUSY_STATUS.to_string());
                None
            }
            Err(_) => None,
        }
    }

    pub fn apply(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Greeting(result) => {
                self.greeting.resolve(result);
            }
            BackendEvent::Answer { id, result } => match self.submission.finish(id, result) {
                Ok(_) => self.status = None,
                Err(SubmitError::Failed(_)) => {
                    self.status = None;
                    self.notice = Some(FAILURE_NOTICE.to_string());
                }
                Err(SubmitError::Stale | SubmitError::Busy) => {}
            },
        }
    }

    pub fn dismiss_notice(&mut self) -> bool {
        self.notice.take().is_some()
    }

    /// Abandons any in-flight question and asks the loop to stop.
    pub fn request_exit(&mut self) {
        self.submission.abort();
        self.exit_requested = true;
    }
}
