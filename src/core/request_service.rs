use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::backend::{Backend, BackendError};
use crate::core::submission::PendingQuestion;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendEvent {
    Greeting(Result<String, BackendError>),
    Answer {
        id: u64,
        result: Result<String, BackendError>,
    },
}

/// Runs backend calls off the event loop and reports their outcomes on a
/// channel. Cancelling drops any call still in flight without reporting it.
pub struct RequestService {
    backend: Arc<dyn Backend>,
    tx: mpsc::UnboundedSender<BackendEvent>,
    cancel_token: CancellationToken,
}

impl RequestService {
    pub fn new(backend: Arc<dyn Backend>) -> (Self, mpsc::UnboundedReceiver<BackendEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                backend,
                tx,
                cancel_token: CancellationToken::new(),
            },
            rx,
        )
    }

    pub fn spawn_greeting(&self) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let cancel_token = self.cancel_token.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancel_token.cancelled() => {}
                result = backend.hello() => {
                    let _ = tx.send(BackendEvent::Greeting(result));
                }
            }
        });
    }

    pub fn spawn_question(&self, pending: PendingQuestion) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let cancel_token = self.cancel_token.clone();
        tokio::spawn(async move {
            let PendingQuestion { id, question } = pending;
            tokio::select! {
                biased;
                _ = cancel_token.cancelled() => {}
                result = backend.ask(&question) => {
                    let _ = tx.send(BackendEvent::Answer { id, result });
                }
            }
        });
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
