use chrono::{DateTime, Utc};
use common::api::Peer;

use super::format::{
    color_enabled, color_online, format_age, format_bytes, format_optional_str, format_timestamp,
};
use super::table::render_table;

pub fn render_peers_table(peers: &[Peer], wide: bool, colors: bool, now: DateTime<Utc>) -> String {
    let mut headers = vec!["ID", "NAME", "IP", "STATE", "ENABLED", "RX", "TX", "SEEN"];
    if wide {
        headers.extend(["DEVICE", "KEEPALIVE", "CREATED"]);
    }

    let rows = peers
        .iter()
        .map(|peer| {
            let mut row = vec![
                peer.id.to_string(),
                peer.name.clone(),
                peer.ip_address.clone(),
                color_online(peer.is_online(now), colors),
                color_enabled(peer.is_enabled, colors),
                format_bytes(peer.total_rx),
                format_bytes(peer.total_tx),
                format_age(peer.last_handshake, now),
            ];
            if wide {
                row.push(format_optional_str(peer.device_name.as_deref()));
                row.push(format!("{}s", peer.persistent_keepalive));
                row.push(format_timestamp(Some(peer.created_at)));
            }
            row
        })
        .collect::<Vec<_>>();

    render_table(&headers, &rows)
}

pub fn render_peer_detail(peer: &Peer, now: DateTime<Utc>) -> String {
    let rows = vec![
        kv("Id", peer.id.to_string()),
        kv("Name", peer.name.clone()),
        kv("Description", format_optional_str(peer.description.as_deref())),
        kv("Device", format_optional_str(peer.device_name.as_deref())),
        kv("Public key", peer.public_key.clone()),
        kv("IP address", peer.ip_address.clone()),
        kv("Allowed IPs", peer.allowed_ips.clone()),
        kv("Keepalive", format!("{}s", peer.persistent_keepalive)),
        kv("Active", peer.is_active.to_string()),
        kv("Enabled", peer.is_enabled.to_string()),
        kv("Online", peer.is_online(now).to_string()),
        kv("Received", format_bytes(peer.total_rx)),
        kv("Sent", format_bytes(peer.total_tx)),
        kv("Last handshake", format_timestamp(peer.last_handshake)),
        kv("Created", format_timestamp(Some(peer.created_at))),
        kv("Updated", format_timestamp(Some(peer.updated_at))),
    ];
    render_table(&["FIELD", "VALUE"], &rows)
}

fn kv(field: &str, value: String) -> Vec<String> {
    vec![field.to_string(), value]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn sample_peer(id: i64, name: &str, last_handshake: Option<DateTime<Utc>>) -> Peer {
        let created = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        Peer {
            id,
            name: name.into(),
            description: None,
            device_name: Some("Pixel 8".into()),
            device_identifier: None,
            public_key: "pk".into(),
            ip_address: "10.0.0.2/32".into(),
            allowed_ips: "0.0.0.0/0".into(),
            persistent_keepalive: 25,
            is_active: true,
            is_enabled: true,
            total_rx: 1536,
            total_tx: 2048,
            last_handshake,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn peers_table_includes_derived_state() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let peers = vec![
            sample_peer(1, "phone", Some(now - TimeDelta::seconds(30))),
            sample_peer(2, "tv", None),
        ];

        let table = render_peers_table(&peers, false, false, now);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("ID  NAME"));
        assert!(lines[1].contains("online"));
        assert!(lines[1].contains("1.5 KiB"));
        assert!(lines[2].contains("offline"));
        assert!(!lines[0].contains("DEVICE"));
    }

    #[test]
    fn wide_table_adds_device_columns() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let peers = vec![sample_peer(1, "phone", None)];
        let table = render_peers_table(&peers, true, false, now);
        assert!(table.lines().next().unwrap().contains("DEVICE"));
        assert!(table.contains("Pixel 8"));
        assert!(table.contains("25s"));
    }

    #[test]
    fn detail_lists_all_fields() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let detail = render_peer_detail(&sample_peer(7, "tablet", None), now);
        assert!(detail.contains("Public key"));
        assert!(detail.contains("Allowed IPs"));
        assert!(detail.contains("Online"));
        assert!(detail.contains("false"));
    }
}
