//! One-shot greeting fetched when an interactive session opens.

use tracing::{debug, warn};

use crate::core::backend::{Backend, BackendError};

pub const GREETING_PLACEHOLDER: &str = "Loading...";
pub const GREETING_FALLBACK: &str = "Error loading message";

/// Display text for the greeting line. Starts at [`GREETING_PLACEHOLDER`] and
/// is replaced exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingState {
    text: String,
    resolved: bool,
}

impl Default for GreetingState {
    fn default() -> Self {
        Self::new()
    }
}

impl GreetingState {
    pub fn new() -> Self {
        Self {
            text: GREETING_PLACEHOLDER.to_string(),
            resolved: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Applies the terminal outcome of the greeting fetch. Returns `false` and
    /// leaves the state alone if an outcome was already applied.
    pub fn resolve(&mut self, result: Result<String, BackendError>) -> bool {
        if self.resolved {
            return false;
        }
        self.text = match result {
            Ok(message) => message,
            Err(err) => {
                warn!(error = %err, "greeting fetch failed");
                GREETING_FALLBACK.to_string()
            }
        };
        self.resolved = true;
        true
    }
}

/// Issues the single greeting request and returns the resolved state.
pub async fn load_greeting<B: Backend + ?Sized>(backend: &B) -> GreetingState {
    let mut state = GreetingState::new();
    let result = backend.hello().await;
    debug!(ok = result.is_ok(), "greeting resolved");
    state.resolve(result);
    state
}
