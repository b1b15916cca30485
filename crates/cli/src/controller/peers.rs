use common::api::{CreatePeerRequest, Peer, PeerConfig, ServerStatistics};

use crate::api::PeerApi;

/// Cached view of the peer collection plus server-wide statistics.
///
/// The cache is replaced wholesale on refresh and patched in place after
/// mutations, always from server responses. On failure the previous cache is
/// kept; `error_message` says why it may be stale.
pub struct PeerListController {
    api: PeerApi,
    peers: Vec<Peer>,
    server_stats: Option<ServerStatistics>,
    is_loading: bool,
    error_message: Option<String>,
}

impl PeerListController {
    pub fn new(api: PeerApi) -> Self {
        Self {
            api,
            peers: Vec::new(),
            server_stats: None,
            is_loading: false,
            error_message: None,
        }
    }

    /// Peers in server order, as of the last successful operation.
    pub fn peers(&self) -> &[Peer] {
        &self.peers
    }

    pub fn server_stats(&self) -> Option<&ServerStatistics> {
        self.server_stats.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Replaces the peer cache with the server's current list and refreshes
    /// the statistics snapshot. The two fetches are independent: either one
    /// failing leaves the other's result intact. When both fail, the peer
    /// list error is the one surfaced.
    pub async fn refresh(&mut self) {
        self.is_loading = true;
        self.error_message = None;
        let fetched = self.api.get_peers().await;
        self.refresh_stats().await;
        match fetched {
            Ok(peers) => self.peers = peers,
            Err(err) => self.error_message = Some(err.to_string()),
        }
        self.is_loading = false;
    }

    /// Stats refresh alongside the peer list; a stats failure keeps the
    /// previous snapshot and sets the error without touching the peers.
    async fn refresh_stats(&mut self) {
        match self.api.get_server_stats().await {
            Ok(stats) => self.server_stats = Some(stats),
            Err(err) => {
                tracing::debug!(%err, "server stats refresh failed");
                self.error_message = Some(err.to_string());
            }
        }
    }

    /// Creates a peer and appends the server's record to the cache.
    pub async fn create(&mut self, req: &CreatePeerRequest) -> Option<Peer> {
        self.is_loading = true;
        self.error_message = None;
        let created = match self.api.create_peer(req).await {
            Ok(peer) => {
                self.peers.push(peer.clone());
                self.refresh_stats().await;
                Some(peer)
            }
            Err(err) => {
                self.error_message = Some(err.to_string());
                None
            }
        };
        self.is_loading = false;
        created
    }

    /// Flips a peer's enabled state and replaces the cached record with the
    /// server's updated copy.
    pub async fn toggle(&mut self, id: i64) -> Option<Peer> {
        self.is_loading = true;
        self.error_message = None;
        let toggled = match self.api.toggle_peer(id).await {
            Ok(updated) => {
                if let Some(slot) = self.peers.iter_mut().find(|p| p.id == id) {
                    *slot = updated.clone();
                }
                Some(updated)
            }
            Err(err) => {
                self.error_message = Some(err.to_string());
                None
            }
        };
        self.is_loading = false;
        toggled
    }

    /// Deletes a peer and drops it from the cache. Returns whether the
    /// delete succeeded; on failure the peer stays cached.
    pub async fn delete(&mut self, id: i64) -> bool {
        self.is_loading = true;
        self.error_message = None;
        let deleted = match self.api.delete_peer(id).await {
            Ok(()) => {
                self.peers.retain(|p| p.id != id);
                self.refresh_stats().await;
                true
            }
            Err(err) => {
                self.error_message = Some(err.to_string());
                false
            }
        };
        self.is_loading = false;
        deleted
    }

    /// Fetches a peer's configuration on demand; never cached.
    pub async fn fetch_config(&mut self, id: i64) -> Option<PeerConfig> {
        self.is_loading = true;
        self.error_message = None;
        let config = match self.api.get_peer_config(id).await {
            Ok(config) => Some(config),
            Err(err) => {
                self.error_message = Some(err.to_string());
                None
            }
        };
        self.is_loading = false;
        config
    }
}
