use chrono::Utc;
use common::api::{Peer, ServerStatistics, User};
use serde::Serialize;

use crate::args::{OutputMode, StatusArgs};
use crate::commands::CommandContext;
use crate::controller::{PeerListController, SessionController};
use crate::view::peers::render_peers_table;
use crate::view::stats::render_server_stats;
use crate::view::{to_pretty_json, to_pretty_yaml};

#[derive(Serialize)]
struct StatusReport<'a> {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a User>,
    peers: &'a [Peer],
    #[serde(skip_serializing_if = "Option::is_none")]
    server_stats: Option<&'a ServerStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

pub async fn handle_status(ctx: &CommandContext, args: StatusArgs) -> anyhow::Result<()> {
    let mut session = SessionController::new(ctx.api()?);
    session.bootstrap().await;

    let mut peers = PeerListController::new(ctx.api()?);
    if session.is_authenticated() {
        peers.refresh().await;
    }

    let report = StatusReport {
        authenticated: session.is_authenticated(),
        user: session.current_user(),
        peers: peers.peers(),
        server_stats: peers.server_stats(),
        error: peers.error_message(),
    };
    match args.output.mode() {
        OutputMode::Json => {
            println!("{}", to_pretty_json(&report)?);
            return Ok(());
        }
        OutputMode::Yaml => {
            print!("{}", to_pretty_yaml(&report)?);
            return Ok(());
        }
        OutputMode::Table => {}
    }

    if !session.is_authenticated() {
        println!("account: not logged in; run `peerctl login`");
        return Ok(());
    }
    match session.current_user() {
        Some(user) => println!("account: {} ({})", user.username, user.email),
        None => println!("account: logged in (details unavailable)"),
    }

    if let Some(message) = peers.error_message() {
        eprintln!("warning: peer list may be stale: {message}");
    }

    println!();
    let colors = !args.no_color;
    println!("{}", render_peers_table(peers.peers(), args.wide, colors, Utc::now()));

    if let Some(stats) = peers.server_stats() {
        println!();
        println!("{}", render_server_stats(stats));
    }
    Ok(())
}
