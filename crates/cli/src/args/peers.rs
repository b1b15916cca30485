use clap::Args;

use super::common::OutputFormatArgs;
use crate::parse::{parse_keepalive, parse_peer_id, parse_peer_name};

#[derive(Debug, Clone, Args)]
pub struct PeerListArgs {
    /// Show extra columns (device, keepalive, created).
    #[arg(long)]
    pub wide: bool,
    /// Output format for structured output (JSON/YAML); defaults to table.
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Clone, Args)]
pub struct PeerShowArgs {
    /// Peer identifier.
    #[arg(long = "id", value_parser = parse_peer_id)]
    pub peer_id: i64,
    /// Output format for structured output (JSON/YAML); defaults to table.
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Clone, Args)]
pub struct PeerCreateArgs {
    /// Display name for the new peer (must be non-empty).
    #[arg(long, value_parser = parse_peer_name)]
    pub name: String,
    /// Optional free-form description.
    #[arg(long)]
    pub description: Option<String>,
    /// Optional device model name.
    #[arg(long = "device-name")]
    pub device_name: Option<String>,
    /// Optional opaque device identifier.
    #[arg(long = "device-id")]
    pub device_identifier: Option<String>,
    /// Output format for structured output (JSON/YAML); defaults to table.
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Clone, Args)]
pub struct PeerUpdateArgs {
    /// Peer identifier.
    #[arg(long = "id", value_parser = parse_peer_id)]
    pub peer_id: i64,
    /// New display name.
    #[arg(long, value_parser = parse_peer_name)]
    pub name: Option<String>,
    /// New description.
    #[arg(long)]
    pub description: Option<String>,
    /// New device model name.
    #[arg(long = "device-name")]
    pub device_name: Option<String>,
    /// New opaque device identifier.
    #[arg(long = "device-id")]
    pub device_identifier: Option<String>,
    /// New persistent keepalive interval in seconds.
    #[arg(long, value_parser = parse_keepalive)]
    pub keepalive: Option<u32>,
    /// New allowed IPs routed through the tunnel.
    #[arg(long = "allowed-ips")]
    pub allowed_ips: Option<String>,
    /// Output format for structured output (JSON/YAML); defaults to table.
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Clone, Args)]
pub struct PeerIdArgs {
    /// Peer identifier.
    #[arg(long = "id", value_parser = parse_peer_id)]
    pub peer_id: i64,
}

#[derive(Debug, Clone, Args)]
pub struct PeerStatsArgs {
    /// Peer identifier.
    #[arg(long = "id", value_parser = parse_peer_id)]
    pub peer_id: i64,
    /// Output format for structured output (JSON/YAML); defaults to table.
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Clone, Args)]
pub struct PeerConfigArgs {
    /// Peer identifier.
    #[arg(long = "id", value_parser = parse_peer_id)]
    pub peer_id: i64,
    /// Write the QR code PNG to this path instead of only printing the config.
    #[arg(long = "qr-out", value_name = "PATH")]
    pub qr_out: Option<std::path::PathBuf>,
}
