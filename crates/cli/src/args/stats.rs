use clap::Args;

use super::common::OutputFormatArgs;

#[derive(Debug, Clone, Args)]
pub struct StatsArgs {
    /// Output format for structured output (JSON/YAML); defaults to table.
    #[command(flatten)]
    pub output: OutputFormatArgs,
}

#[derive(Debug, Clone, Args)]
pub struct StatusArgs {
    /// Show extra columns in the peer table.
    #[arg(long)]
    pub wide: bool,
    /// Disable ANSI colors in table output.
    #[arg(long = "no-color")]
    pub no_color: bool,
    /// Output format for structured output (JSON/YAML); defaults to tables.
    #[command(flatten)]
    pub output: OutputFormatArgs,
}
