use crate::args::{OutputMode, StatsArgs};
use crate::commands::CommandContext;
use crate::view::stats::render_server_stats;
use crate::view::{to_pretty_json, to_pretty_yaml};

pub async fn handle_stats(ctx: &CommandContext, args: StatsArgs) -> anyhow::Result<()> {
    let stats = ctx.api()?.get_server_stats().await?;
    match args.output.mode() {
        OutputMode::Table => println!("{}", render_server_stats(&stats)),
        OutputMode::Json => println!("{}", to_pretty_json(&stats)?),
        OutputMode::Yaml => print!("{}", to_pretty_yaml(&stats)?),
    }
    Ok(())
}
