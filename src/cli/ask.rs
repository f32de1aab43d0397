//! TUI-less "ask" command

use std::error::Error;

use crate::core::app::FAILURE_NOTICE;
use crate::core::backend::Backend;
use crate::core::submission::{SubmissionController, SubmitError};

pub async fn run_ask(backend: &dyn Backend, question: Vec<String>) -> Result<(), Box<dyn Error>> {
    let question = question.join(" ");
    let mut controller = SubmissionController::new();
    controller.set_input(question.as_str());

    match controller.submit(backend, &question).await {
        Ok(Some(answer)) => {
            println!("{answer}");
            Ok(())
        }
        Ok(None) => {
            eprintln!("Usage: verdict ask <question>");
            std::process::exit(2);
        }
        Err(SubmitError::Failed(err)) => {
            eprintln!("❌ {FAILURE_NOTICE} ({err})");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}
