pub mod api;
pub mod args;
pub mod commands;
pub mod controller;
pub mod credentials;
pub mod parse;
#[cfg(test)]
mod test_support;
mod version;
pub mod view;

pub use api::PeerApi;
pub use args::*;
pub use commands::CommandContext;
pub use parse::*;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use crate::api::REQUEST_TIMEOUT_SECS;
use crate::commands::auth::{handle_login, handle_logout, handle_whoami};
use crate::commands::completions::generate_completions;
use crate::commands::health::handle_health;
use crate::commands::peers::handle_peers;
use crate::commands::stats::handle_stats;
use crate::commands::status::handle_status;
use crate::credentials::FileCredentialStore;

/// Shared async entrypoint used by the CLI binary.
pub async fn run() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    run_parsed(cli).await
}

/// Execute the CLI given a pre-parsed argument struct.
pub async fn run_parsed(cli: Cli) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;

    let base = cli.globals.server_url.trim_end_matches('/').to_string();
    let store = Arc::new(FileCredentialStore::open_default()?);
    let ctx = CommandContext::new(client, base, store);

    match cli.command {
        Commands::Login(args) => handle_login(&ctx, args).await?,
        Commands::Logout => handle_logout(&ctx)?,
        Commands::Whoami(args) => handle_whoami(&ctx, args).await?,
        Commands::Peers { command } => handle_peers(&ctx, command).await?,
        Commands::Stats(args) => handle_stats(&ctx, args).await?,
        Commands::Status(args) => handle_status(&ctx, args).await?,
        Commands::Health => handle_health(&ctx).await?,
        Commands::Completions { shell } => generate_completions(shell),
    }

    Ok(())
}

/// Logging goes to stderr so structured stdout output stays parseable.
/// `PEERCTL_LOG` takes precedence over `RUST_LOG`; the default is `warn`.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("PEERCTL_LOG")
        .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
