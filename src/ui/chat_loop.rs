//! Interactive event loop.
//!
//! Owns the terminal for the lifetime of the session, maps key presses onto
//! [`App`] intents, dispatches requests through [`RequestService`] and folds
//! their outcomes back in.

use crate::core::app::App;
use crate::core::backend::Backend;
use crate::core::request_service::{BackendEvent, RequestService};
use crate::core::submission::PendingQuestion;
use crate::ui::renderer::ui;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{error::Error, io, sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tracing::debug;

pub async fn run_chat(backend: Arc<dyn Backend>, base_url: String) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(base_url);
    let (service, mut rx) = RequestService::new(backend);
    service.spawn_greeting();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut app, &service, &mut rx).await;

    // In-flight requests are dropped, not awaited.
    service.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    service: &RequestService,
    rx: &mut mpsc::UnboundedReceiver<BackendEvent>,
) -> Result<(), Box<dyn Error>> {
    loop {
        if app.exit_requested {
            return Ok(());
        }
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(pending) = handle_key(app, key) {
                        debug!(id = pending.id, "dispatching question");
                        service.spawn_question(pending);
                    }
                }
            }
        }

        while let Ok(backend_event) = rx.try_recv() {
            app.apply(backend_event);
        }
    }
}

/// Applies one key press. Returns a question to dispatch when the press
/// started a submission.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<PendingQuestion> {
    if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.request_exit();
        return None;
    }

    // The failure notice blocks everything else until acknowledged.
    if app.dismiss_notice() {
        return None;
    }

    match key.code {
        KeyCode::Enter => app.submit_current(),
        KeyCode::Backspace => {
            app.submission.pop_char();
            None
        }
        KeyCode::Esc => {
            app.status = None;
            None
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.submission.push_char(ch);
            None
        }
        _ => None,
    }
}
