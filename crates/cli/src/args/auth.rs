use clap::Args;

use super::common::OutputFormatArgs;

#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    /// Account username.
    #[arg(long)]
    pub username: String,
    /// Account password; prompted interactively when omitted.
    #[arg(long, env = "PEERCTL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct WhoamiArgs {
    /// Output format for structured output (JSON/YAML); defaults to table.
    #[command(flatten)]
    pub output: OutputFormatArgs,
}
