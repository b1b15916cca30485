use clap::{Args, Parser, Subcommand};

use crate::version;

pub mod auth;
pub mod common;
pub mod peers;
pub mod stats;

pub use auth::*;
pub use common::*;
pub use peers::*;
pub use stats::*;

#[derive(Debug, Parser)]
#[command(
    name = "peerctl",
    version = version::VERSION,
    long_version = version::FULL_VERSION.as_str(),
    about = "peerctl - VPN peer management console"
)]
pub struct Cli {
    #[command(flatten)]
    pub globals: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Management server base URL, e.g. http://127.0.0.1:8000
    #[arg(
        long,
        env = "PEERCTL_SERVER_URL",
        default_value = "http://127.0.0.1:8000"
    )]
    pub server_url: String,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the bearer token locally.
    Login(LoginArgs),
    /// Discard the stored bearer token.
    Logout,
    /// Show the currently authenticated account.
    Whoami(WhoamiArgs),
    /// Peer management commands.
    Peers {
        #[command(subcommand)]
        command: PeerCommands,
    },
    /// Server-wide traffic statistics.
    Stats(StatsArgs),
    /// Combined overview: account, peers, and server statistics.
    Status(StatusArgs),
    /// Probe the server's health endpoint.
    Health,
    /// Generate shell completions for the CLI.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Debug, Subcommand)]
pub enum PeerCommands {
    /// List peers.
    List(PeerListArgs),
    /// Show a single peer.
    Show(PeerShowArgs),
    /// Create a new peer.
    Create(PeerCreateArgs),
    /// Update fields on an existing peer.
    Update(PeerUpdateArgs),
    /// Flip a peer's enabled state.
    Toggle(PeerIdArgs),
    /// Delete a peer.
    Delete(PeerIdArgs),
    /// Fetch a peer's tunnel configuration.
    Config(PeerConfigArgs),
    /// Traffic statistics for a single peer.
    Stats(PeerStatsArgs),
}
