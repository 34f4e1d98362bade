//! Awab chat shell - composition root.
//!
//! 1. Parse CLI args and initialize tracing (stderr, stdout is the transcript)
//! 2. Load configuration from TOML, then apply its log level
//! 3. Build the pattern resolver over the simulated device
//! 4. Start the transcript printer
//! 5. Feed stdin lines to the orchestrator, one turn per line

mod cli;

use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use awab_chat::{ChatMessage, ChatOrchestrator, SettingsNavigator, Transcript};
use awab_command::PatternResolver;
use awab_core::config::AwabConfig;
use awab_core::types::Author;

use cli::CliArgs;

/// Settings navigation for a terminal host: there is no settings screen, so
/// the request is logged.
struct LoggingNavigator;

impl SettingsNavigator for LoggingNavigator {
    fn open_settings(&self) {
        tracing::info!("Settings screen requested");
    }
}

/// Print transcript messages as they are appended.
///
/// Text mode prints assistant messages only; the user already sees what
/// they typed. JSON mode prints every message, one object per line.
async fn print_transcript(mut rx: tokio::sync::broadcast::Receiver<ChatMessage>, json: bool) {
    loop {
        match rx.recv().await {
            Ok(message) => {
                if json {
                    match serde_json::to_string(&message) {
                        Ok(line) => println!("{}", line),
                        Err(e) => tracing::warn!(error = %e, "Failed to encode message"),
                    }
                } else if message.author == Author::Assistant {
                    println!("أواب> {}\n", message.text);
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Transcript printer fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

fn env_filter(directives: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_new(directives)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Tracing starts on the CLI/env filter and is switched to the configured
    // level once the config file has been read.
    let initial_filter = args.log_filter_override().unwrap_or_else(|| "info".to_string());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&initial_filter))
        .with_writer(std::io::stderr)
        .with_filter_reloading();
    let filter_handle = builder.reload_handle();
    builder.init();

    tracing::info!("Starting Awab v{}", env!("CARGO_PKG_VERSION"));

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = AwabConfig::load_or_default(&config_file);

    let filter = args.resolve_log_filter(&config.general.log_level);
    if filter != initial_filter {
        filter_handle.reload(env_filter(&filter))?;
    }

    if args.init_config {
        config.save(&config_file)?;
        println!("{}", config_file.display());
        return Ok(());
    }

    if args.no_delay {
        config.chat = config.chat.without_delays();
    }

    // Engine.
    let resolver = Arc::new(PatternResolver::with_defaults(&config.device));
    tracing::info!(
        apps = config.device.installed_apps.len(),
        contacts = config.device.contacts.len(),
        "Simulated device ready"
    );

    let transcript = Arc::new(Transcript::new());
    let printer = tokio::spawn(print_transcript(transcript.subscribe(), args.json));

    let orchestrator = ChatOrchestrator::with_transcript(
        config.chat.clone(),
        resolver,
        Arc::new(LoggingNavigator),
        Arc::clone(&transcript),
    )?;
    tracing::info!(session_id = %transcript.session_id(), "Chat session started");

    // Input loop.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if let Err(e) = orchestrator.handle_message(&line).await {
                    tracing::warn!(error = %e, "Message rejected");
                    eprintln!("⚠️ {}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    // Dropping every transcript handle closes the channel so the printer
    // drains what is buffered and exits.
    drop(orchestrator);
    let messages = transcript.len();
    drop(transcript);
    if let Err(e) = printer.await {
        tracing::warn!(error = %e, "Transcript printer task failed");
    }

    tracing::info!(messages, "Chat session ended");
    Ok(())
}
