use crate::commands::CommandContext;

/// Exits nonzero when the server is unreachable or unhealthy so the command
/// can back shell scripts and probes.
pub async fn handle_health(ctx: &CommandContext) -> anyhow::Result<()> {
    if ctx.api()?.health_check().await {
        println!("ok");
        Ok(())
    } else {
        anyhow::bail!("server at {} is not healthy", ctx.base)
    }
}
