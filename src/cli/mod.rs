//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod ask;
pub mod probe;
pub mod settings;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::cli::ask::run_ask;
use crate::cli::probe::{run_health, run_hello};
use crate::cli::settings::{set_value, unset_value};
use crate::core::backend::HttpBackend;
use crate::core::config::{Config, BASE_URL_ENV};
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_tracing;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("VERGEN_BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(name = "verdict", version, long_version = LONG_VERSION)]
#[command(about = "A terminal client for the decision debate backend")]
#[command(
    long_about = "Verdict asks a decision backend to argue both sides of a question and \
returns the judge's answer. Run without a command to open the interactive screen.\n\n\
Environment Variables:\n\
  VERDICT_BASE_URL  Backend root URL (overrides the config file)\n\
  VERDICT_LOG       Tracing filter, e.g. 'debug' (default 'warn')\n\n\
Controls:\n\
  Type              Enter your question in the input field\n\
  Enter             Send the question\n\
  Any key           Dismiss an error notice\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend root URL
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Write diagnostic traces to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive screen (default)
    Chat,
    /// Ask a single question and print the answer
    Ask {
        /// The question to ask (can be multiple words)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        question: Vec<String>,
    },
    /// Print the backend greeting
    Hello,
    /// Check that the backend is up
    Health,
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
    /// Print the current configuration
    Config,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Chat);

    init_tracing(args.log.as_deref(), matches!(command, Commands::Chat))?;

    let mut config = Config::load()?;

    match command {
        Commands::Set { key, value } => {
            match set_value(&mut config, &key, &value) {
                Ok(message) => {
                    config.save()?;
                    println!("{message}");
                }
                Err(err) => {
                    err.print();
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            match unset_value(&mut config, &key) {
                Ok(message) => {
                    config.save()?;
                    println!("{message}");
                }
                Err(err) => {
                    err.print();
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Config => {
            config.print_all();
            Ok(())
        }
        command => {
            let base_url =
                config.resolve_base_url(args.base_url.as_deref(), std::env::var(BASE_URL_ENV).ok());
            tracing::debug!(%base_url, "resolved backend");
            let backend = HttpBackend::new(base_url.clone(), config.request_timeout())?;

            match command {
                Commands::Ask { question } => run_ask(&backend, question).await,
                Commands::Hello => run_hello(&backend).await,
                Commands::Health => run_health(&backend, &base_url).await,
                _ => run_chat(Arc::new(backend), base_url).await,
            }
        }
    }
}
