//! imessage-dispatch - send iMessages from the terminal
//!
//! AppleScript for sending, direct SQLite reads for chat listing.
//!
//! CHANGELOG:
//! - 01/12/2026 - Bulk, send, interactive and chats subcommands
//! - 01/10/2026 - Initial scaffold with CLI skeleton

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

use imessage_dispatch::commands;
use imessage_dispatch::config::{Config, Overrides};
use imessage_dispatch::output::{format_error, OutputControls};
use imessage_dispatch::transport::{ChatKind, ChatQuery, MessagesTransport};

/// Send iMessages from the terminal - one at a time, in bulk, or interactively.
#[derive(Parser, Debug)]
#[command(name = "imessage-dispatch")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Output as JSON (send, bulk and chats support this)
    #[arg(long, global = true)]
    json: bool,

    /// Compact JSON output (no whitespace)
    #[arg(long, global = true)]
    compact: bool,

    /// Verbose logging to stderr
    #[arg(long, global = true)]
    debug: bool,

    /// Messages database path (default: ~/Library/Messages/chat.db)
    #[arg(long, global = true, value_name = "PATH")]
    db_path: Option<String>,

    /// Sends in flight at once during a bulk send (default: 3)
    #[arg(long, global = true, value_name = "N")]
    max_concurrent: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send the same message to multiple recipients
    Bulk {
        /// Message to send
        message: String,

        /// Phone numbers, emails or chat ids
        #[arg(required = true)]
        recipients: Vec<String>,
    },

    /// Send a message to one recipient
    Send {
        /// Phone number, email or chat id
        recipient: String,

        /// Message to send
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Send messages interactively (type /help once started)
    Interactive,

    /// List recent chats
    Chats {
        /// Max chats (1-500)
        #[arg(short, long, default_value_t = 10)]
        limit: u32,

        /// Only group chats
        #[arg(long, conflicts_with = "direct")]
        groups: bool,

        /// Only one-to-one chats
        #[arg(long)]
        direct: bool,

        /// Only chats with unread messages
        #[arg(long)]
        unread: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing/logging
    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = OutputControls {
        json: cli.json,
        compact: cli.compact,
    };

    let overrides = Overrides {
        db_path: cli.db_path.clone(),
        max_concurrent: cli.max_concurrent,
    };
    let config = match Config::load(&overrides) {
        Ok(config) => config,
        Err(e) => return report_error(&anyhow::Error::new(e), &output),
    };

    let transport = Arc::new(MessagesTransport::new(config.db_path.clone()));
    let command = execute(cli.command, &transport, &config, &output);

    match commands::run_and_close(&transport, command).await {
        Ok(()) => ExitCode::from(0),
        Err(e) => report_error(&e, &output),
    }
}

/// Run one subcommand against the transport `main` owns.
async fn execute(
    command: Command,
    transport: &Arc<MessagesTransport>,
    config: &Config,
    output: &OutputControls,
) -> anyhow::Result<()> {
    match command {
        Command::Bulk {
            message,
            recipients,
        } => {
            commands::messaging::bulk(
                transport,
                config.max_concurrent,
                &message,
                &recipients,
                output,
            )
            .await
        }
        Command::Send { recipient, message } => {
            commands::messaging::send(transport, &recipient, &message.join(" "), output).await
        }
        Command::Interactive => commands::interactive::run(transport).await,
        Command::Chats {
            limit,
            groups,
            direct,
            unread,
        } => {
            let kind = if groups {
                Some(ChatKind::Group)
            } else if direct {
                Some(ChatKind::Direct)
            } else {
                None
            };
            let query = ChatQuery {
                limit: Some(limit.clamp(1, 500)),
                kind,
                unread_only: unread,
            };
            commands::chats::list(transport, &query, output).await
        }
    }
}

fn report_error(error: &anyhow::Error, output: &OutputControls) -> ExitCode {
    if output.json {
        eprintln!("{}", format_error(&format!("{:#}", error)));
    } else {
        eprintln!("❌ {:#}", error);
    }
    ExitCode::from(1)
}
