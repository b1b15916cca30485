use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use common::api::{CreatePeerRequest, UpdatePeerRequest};

use crate::args::{
    OutputMode, PeerCommands, PeerConfigArgs, PeerCreateArgs, PeerIdArgs, PeerListArgs,
    PeerShowArgs, PeerStatsArgs, PeerUpdateArgs,
};
use crate::commands::CommandContext;
use crate::controller::PeerListController;
use crate::view::peers::{render_peer_detail, render_peers_table};
use crate::view::stats::render_peer_stats;
use crate::view::{to_pretty_json, to_pretty_yaml};

pub async fn handle_peers(ctx: &CommandContext, command: PeerCommands) -> anyhow::Result<()> {
    match command {
        PeerCommands::List(args) => list_peers(ctx, args).await,
        PeerCommands::Show(args) => show_peer(ctx, args).await,
        PeerCommands::Create(args) => create_peer(ctx, args).await,
        PeerCommands::Update(args) => update_peer(ctx, args).await,
        PeerCommands::Toggle(args) => toggle_peer(ctx, args).await,
        PeerCommands::Delete(args) => delete_peer(ctx, args).await,
        PeerCommands::Config(args) => fetch_config(ctx, args).await,
        PeerCommands::Stats(args) => peer_stats(ctx, args).await,
    }
}

async fn peer_stats(ctx: &CommandContext, args: PeerStatsArgs) -> anyhow::Result<()> {
    let stats = ctx.api()?.get_peer_stats(args.peer_id).await?;
    match args.output.mode() {
        OutputMode::Table => println!("{}", render_peer_stats(&stats)),
        OutputMode::Json => println!("{}", to_pretty_json(&stats)?),
        OutputMode::Yaml => print!("{}", to_pretty_yaml(&stats)?),
    }
    Ok(())
}

async fn list_peers(ctx: &CommandContext, args: PeerListArgs) -> anyhow::Result<()> {
    let peers = ctx.api()?.get_peers().await?;
    match args.output.mode() {
        OutputMode::Table => {
            println!("{}", render_peers_table(&peers, args.wide, true, Utc::now()));
        }
        OutputMode::Json => println!("{}", to_pretty_json(&peers)?),
        OutputMode::Yaml => print!("{}", to_pretty_yaml(&peers)?),
    }
    Ok(())
}

async fn show_peer(ctx: &CommandContext, args: PeerShowArgs) -> anyhow::Result<()> {
    let peer = ctx.api()?.get_peer(args.peer_id).await?;
    match args.output.mode() {
        OutputMode::Table => println!("{}", render_peer_detail(&peer, Utc::now())),
        OutputMode::Json => println!("{}", to_pretty_json(&peer)?),
        OutputMode::Yaml => print!("{}", to_pretty_yaml(&peer)?),
    }
    Ok(())
}

async fn create_peer(ctx: &CommandContext, args: PeerCreateArgs) -> anyhow::Result<()> {
    let req = CreatePeerRequest {
        name: args.name,
        description: args.description,
        device_name: args.device_name,
        device_identifier: args.device_identifier,
    };

    let mut controller = PeerListController::new(ctx.api()?);
    let Some(peer) = controller.create(&req).await else {
        anyhow::bail!(
            "create failed: {}",
            controller.error_message().unwrap_or("unknown error")
        );
    };

    match args.output.mode() {
        OutputMode::Table => println!("{}", render_peer_detail(&peer, Utc::now())),
        OutputMode::Json => println!("{}", to_pretty_json(&peer)?),
        OutputMode::Yaml => print!("{}", to_pretty_yaml(&peer)?),
    }
    Ok(())
}

async fn update_peer(ctx: &CommandContext, args: PeerUpdateArgs) -> anyhow::Result<()> {
    let req = UpdatePeerRequest {
        name: args.name,
        description: args.description,
        device_name: args.device_name,
        device_identifier: args.device_identifier,
        persistent_keepalive: args.keepalive,
        allowed_ips: args.allowed_ips,
    };
    if req.is_empty() {
        anyhow::bail!("nothing to update; pass at least one field flag");
    }

    let peer = ctx.api()?.update_peer(args.peer_id, &req).await?;
    match args.output.mode() {
        OutputMode::Table => println!("{}", render_peer_detail(&peer, Utc::now())),
        OutputMode::Json => println!("{}", to_pretty_json(&peer)?),
        OutputMode::Yaml => print!("{}", to_pretty_yaml(&peer)?),
    }
    Ok(())
}

async fn toggle_peer(ctx: &CommandContext, args: PeerIdArgs) -> anyhow::Result<()> {
    let mut controller = PeerListController::new(ctx.api()?);
    let Some(peer) = controller.toggle(args.peer_id).await else {
        anyhow::bail!(
            "toggle failed: {}",
            controller.error_message().unwrap_or("unknown error")
        );
    };
    let state = if peer.is_enabled { "enabled" } else { "disabled" };
    println!("peer {} ({}) is now {}", peer.id, peer.name, state);
    Ok(())
}

async fn delete_peer(ctx: &CommandContext, args: PeerIdArgs) -> anyhow::Result<()> {
    let mut controller = PeerListController::new(ctx.api()?);
    if !controller.delete(args.peer_id).await {
        anyhow::bail!(
            "delete failed: {}",
            controller.error_message().unwrap_or("unknown error")
        );
    }
    println!("peer {} deleted", args.peer_id);
    Ok(())
}

async fn fetch_config(ctx: &CommandContext, args: PeerConfigArgs) -> anyhow::Result<()> {
    let mut controller = PeerListController::new(ctx.api()?);
    let Some(config) = controller.fetch_config(args.peer_id).await else {
        anyhow::bail!(
            "config fetch failed: {}",
            controller.error_message().unwrap_or("unknown error")
        );
    };

    if let Some(path) = args.qr_out {
        let Some(encoded) = config.qr_code_base64.as_deref() else {
            anyhow::bail!("server returned no QR code for peer {}", args.peer_id);
        };
        let png = BASE64
            .decode(encoded)
            .map_err(|err| anyhow::anyhow!("invalid QR code payload: {err}"))?;
        std::fs::write(&path, png)?;
        eprintln!("wrote QR code to {}", path.display());
    }

    print!("{}", config.config_text);
    if !config.config_text.ends_with('\n') {
        println!();
    }
    Ok(())
}
