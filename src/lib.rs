//! Verdict is a terminal client for a decision debate backend.
//!
//! - [`core`] owns the greeting loader, the submission state machine, the
//!   backend contract and configuration.
//! - [`ui`] renders the interactive screen and runs its event loop.
//! - [`cli`] parses arguments and dispatches commands.
//! - [`api`] defines the JSON payloads exchanged with the backend.
//!
//! The binary (`src/main.rs`) routes straight into [`cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
