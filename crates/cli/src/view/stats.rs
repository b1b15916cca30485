use common::api::{PeerStatistics, ServerStatistics, User};

use super::format::{format_bytes, format_timestamp};
use super::table::render_table;

pub fn render_server_stats(stats: &ServerStatistics) -> String {
    let rows = vec![
        kv("Total peers", stats.total_peers.to_string()),
        kv("Active", stats.active_peers.to_string()),
        kv("Enabled", stats.enabled_peers.to_string()),
        kv("Disabled", stats.disabled_peers.to_string()),
        kv("Online", stats.online_peers.to_string()),
        kv("Received", stats.total_rx_human.clone()),
        kv("Sent", stats.total_tx_human.clone()),
    ];
    render_table(&["FIELD", "VALUE"], &rows)
}

pub fn render_peer_stats(stats: &PeerStatistics) -> String {
    let rows = vec![
        kv("Peer", format!("{} (id {})", stats.name, stats.peer_id)),
        kv("Online", stats.online.to_string()),
        kv("Received", format_bytes(stats.total_rx)),
        kv("Sent", format_bytes(stats.total_tx)),
        kv("Last handshake", format_timestamp(stats.last_handshake)),
    ];
    render_table(&["FIELD", "VALUE"], &rows)
}

pub fn render_user(user: &User) -> String {
    let rows = vec![
        kv("Id", user.id.to_string()),
        kv("Username", user.username.clone()),
        kv("Email", user.email.clone()),
        kv("Active", user.is_active.to_string()),
        kv("Superuser", user.is_superuser.to_string()),
        kv("Created", format_timestamp(Some(user.created_at))),
    ];
    render_table(&["FIELD", "VALUE"], &rows)
}

fn kv(field: &str, value: String) -> Vec<String> {
    vec![field.to_string(), value]
}
