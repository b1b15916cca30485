//! Wire DTOs shared between the API client, controllers, and views.
//!
//! Field names follow the server's snake_case JSON exactly; timestamps are
//! ISO-8601. The client never constructs or mutates an authoritative record;
//! it only sends requests and replaces cached copies with server responses.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Freshness window for the derived online predicate, in seconds.
///
/// A peer counts as online when its last handshake is younger than this.
pub const ONLINE_WINDOW_SECS: i64 = 180;

/// Operator account as reported by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Account identifier.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Whether the account may log in.
    pub is_active: bool,
    /// Whether the account has administrative rights.
    pub is_superuser: bool,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A managed VPN peer device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Peer {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional device model name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    /// Optional opaque device identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_identifier: Option<String>,
    /// Peer public key.
    pub public_key: String,
    /// Assigned tunnel address in CIDR form.
    pub ip_address: String,
    /// Allowed IPs routed through the tunnel.
    pub allowed_ips: String,
    /// Persistent keepalive interval in seconds.
    pub persistent_keepalive: u32,
    /// Whether the peer record is active on the server.
    pub is_active: bool,
    /// Whether the peer is enabled in the tunnel config.
    pub is_enabled: bool,
    /// Bytes received from the peer (monotonic while connected).
    pub total_rx: u64,
    /// Bytes sent to the peer (monotonic while connected).
    pub total_tx: u64,
    /// Timestamp of the last successful protocol exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_handshake: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Peer {
    /// Derived predicate: the last handshake exists and is within the
    /// freshness window of `now`. Never stored, always recomputed.
    pub fn is_online(&self, now: DateTime<Utc>) -> bool {
        match self.last_handshake {
            Some(seen) => {
                now.signed_duration_since(seen) < TimeDelta::seconds(ONLINE_WINDOW_SECS)
            }
            None => false,
        }
    }
}

/// Bearer token payload returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    /// Opaque bearer token.
    pub access_token: String,
    /// Token scheme, normally `bearer`.
    pub token_type: String,
}

/// Generated peer configuration, fetched on demand and never cached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeerConfig {
    /// Rendered tunnel configuration text.
    pub config_text: String,
    /// Optional PNG QR code of the configuration, base64-encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code_base64: Option<String>,
}

/// Traffic statistics for a single peer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeerStatistics {
    /// Peer identifier.
    pub peer_id: i64,
    /// Peer display name.
    pub name: String,
    /// Bytes received from the peer.
    pub total_rx: u64,
    /// Bytes sent to the peer.
    pub total_tx: u64,
    /// Timestamp of the last handshake, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_handshake: Option<DateTime<Utc>>,
    /// Online flag as computed by the server.
    pub online: bool,
}

/// Server-wide aggregate statistics snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerStatistics {
    /// Total number of peer records.
    pub total_peers: u32,
    /// Peers marked active.
    pub active_peers: u32,
    /// Peers enabled in the tunnel config.
    pub enabled_peers: u32,
    /// Peers disabled in the tunnel config.
    pub disabled_peers: u32,
    /// Peers with a fresh handshake.
    pub online_peers: u32,
    /// Aggregate bytes received across all peers.
    pub total_rx_bytes: u64,
    /// Aggregate bytes sent across all peers.
    pub total_tx_bytes: u64,
    /// Human-readable rendering of `total_rx_bytes`, server-formatted.
    pub total_rx_human: String,
    /// Human-readable rendering of `total_tx_bytes`, server-formatted.
    pub total_tx_human: String,
}

/// Request body for creating a peer. The server assigns id, keys, and
/// addresses; omitted fields are absent from the JSON body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatePeerRequest {
    /// Display name for the new peer.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional device model name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    /// Optional opaque device identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_identifier: Option<String>,
}

/// Partial update body for PATCH; only supplied fields appear in the JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdatePeerRequest {
    /// New display name (None means unchanged).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description (None means unchanged).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New device model name (None means unchanged).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    /// New device identifier (None means unchanged).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_identifier: Option<String>,
    /// New keepalive interval in seconds (None means unchanged).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent_keepalive: Option<u32>,
    /// New allowed IPs (None means unchanged).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_ips: Option<String>,
}

impl UpdatePeerRequest {
    /// True when no field is set; a PATCH with this body would be a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.device_name.is_none()
            && self.device_identifier.is_none()
            && self.persistent_keepalive.is_none()
            && self.allowed_ips.is_none()
    }
}

/// Error envelope the server attaches to 4xx/5xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorDetail {
    /// Human-readable failure description.
    pub detail: String,
}
