//! Command-line tool for the notification receiver.
//!
//! Commands:
//! - send: Post a notification (or a raw body) to a running receiver
//! - kinds: List the notification types the receiver recognizes
//!
//! Configuration via environment:
//! - NOTIFY_URL: Full URL of the receiver endpoint
//!   (default: http://localhost:3000/notifications)

mod commands;

use clap::{Parser, Subcommand};

use commands::{kinds::KindsArgs, send::SendArgs};

/// Notification receiver CLI
///
/// Simulate identity-provider callbacks against a receiver. Output is JSON by
/// default; pass --human for formatted text.
#[derive(Parser)]
#[command(name = "notify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Receiver endpoint URL
    #[arg(
        long,
        env = "NOTIFY_URL",
        default_value = "http://localhost:3000/notifications",
        global = true
    )]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a notification to the receiver
    Send(SendArgs),

    /// List recognized notification types
    Kinds(KindsArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Send(args) => commands::send::execute(&cli.url, cli.human, args).await,
        Commands::Kinds(args) => commands::kinds::execute(cli.human, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
