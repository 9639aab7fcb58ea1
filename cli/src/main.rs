//! Interactive terminal chat for fooddost.
//!
//! Reads one free-text request per turn, runs it through the two-stage
//! pipeline, and prints the recommendation. Exit with Ctrl-C or Ctrl-D.

use anyhow::Result;
use colored::Colorize;
use fooddost_core::{AppConfig, ChatSession, DatasetProvider, GeminiProvider, GREETING};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use spinners::{Spinner, Spinners};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Console logging on stderr, controlled by RUST_LOG. The chat itself owns
/// stdout.
fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // Missing secrets are fatal; better to refuse to start than to chat
    // with a broken model client or no dataset source.
    let config = AppConfig::from_env()?;
    tracing::info!(model = %config.model, "starting fooddost");

    let provider = Arc::new(GeminiProvider::from_config(&config));
    let dataset = Arc::new(DatasetProvider::new(config.sheet_url.clone()));
    let mut session = ChatSession::new(provider, dataset);

    println!("{}", "Kya Khaoge? Mei bataun? 😋".yellow().bold());
    println!();
    println!("{} {}", "Food Dost:".green().bold(), GREETING);
    println!(
        "{}",
        "(e.g., I'm near CST, have ₹200 and want something cheesy!)".dimmed()
    );
    println!();

    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline("You: ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                let mut spinner =
                    Spinner::new(Spinners::Dots, "Finding your perfect meal...".into());
                let reply = session.respond(line).await;
                spinner.stop_with_message(String::new());

                println!("{} {}", "Food Dost:".green().bold(), reply);
                println!();
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("{}", "Bye, boss! Khana kha lena.".dimmed());
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
