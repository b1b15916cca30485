use std::sync::Arc;

use common::api::{
    CreatePeerRequest, ErrorDetail, Peer, PeerConfig, PeerStatistics, ServerStatistics,
    TokenResponse, UpdatePeerRequest, User,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::credentials::{CredentialStore, TOKEN_KEY, USERNAME_KEY};

mod error;
pub use error::ApiError;

/// Fixed per-request timeout applied to the shared `reqwest::Client`.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Endpoint path table; the server owns this layout and the client must
/// match it exactly.
pub mod routes {
    pub const AUTH_TOKEN: &str = "/api/auth/token";
    pub const AUTH_ME: &str = "/api/auth/me";
    pub const PEERS: &str = "/api/peers/";
    pub const SERVER_STATS: &str = "/api/peers/stats/server";
    pub const HEALTH: &str = "/health";

    pub fn peer(id: i64) -> String {
        format!("/api/peers/{id}")
    }

    pub fn peer_config(id: i64) -> String {
        format!("/api/peers/{id}/config")
    }

    pub fn peer_toggle(id: i64) -> String {
        format!("/api/peers/{id}/toggle")
    }

    pub fn peer_stats(id: i64) -> String {
        format!("/api/peers/{id}/stats")
    }
}

/// Typed client for the peer management API.
///
/// The sole component permitted to perform network I/O, and the sole writer
/// of the credential store: a successful login writes the token, any 401
/// (and `logout`) deletes it.
#[derive(Clone)]
pub struct PeerApi {
    client: Client,
    base: String,
    store: Arc<dyn CredentialStore>,
}

impl PeerApi {
    /// Builds a client against `base`, validating the URL up front so a
    /// malformed base fails with [`ApiError::InvalidUrl`] before any request
    /// is constructed.
    pub fn new(
        client: Client,
        base: impl Into<String>,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, ApiError> {
        let base = base.into();
        let trimmed = base.trim_end_matches('/').to_string();
        url::Url::parse(&trimmed).map_err(|_| ApiError::InvalidUrl(base))?;
        Ok(Self {
            client,
            base: trimmed,
            store,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    /// Every operation except `login` and `health_check` requires a stored
    /// token; without one the call fails before reaching the network.
    fn bearer_token(&self) -> Result<String, ApiError> {
        self.store.get(TOKEN_KEY).ok_or(ApiError::Unauthorized)
    }

    async fn send_authed(&self, path: &str, req: RequestBuilder) -> Result<Response, ApiError> {
        let token = self.bearer_token()?;
        tracing::debug!(path, "sending authenticated request");
        let res = req
            .bearer_auth(token)
            .send()
            .await
            .map_err(ApiError::transport)?;
        self.check_status(res).await
    }

    async fn check_status(&self, res: Response) -> Result<Response, ApiError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        if status.is_redirection() {
            return Err(ApiError::InvalidResponse);
        }
        if status == StatusCode::UNAUTHORIZED {
            if let Err(err) = self.store.delete(TOKEN_KEY) {
                tracing::warn!(%err, "failed to clear stored token after 401");
            }
            return Err(ApiError::Unauthorized);
        }
        let body = res.text().await.unwrap_or_default();
        Err(classify_failure(status, &body))
    }

    async fn get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let res = self.send_authed(path, self.client.get(self.url(path))).await?;
        decode(res).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.client.post(self.url(path)).json(body);
        let res = self.send_authed(path, req).await?;
        decode(res).await
    }

    async fn post_empty<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let res = self.send_authed(path, self.client.post(self.url(path))).await?;
        decode(res).await
    }

    async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.client.patch(self.url(path)).json(body);
        let res = self.send_authed(path, req).await?;
        decode(res).await
    }

    /// Exchanges credentials for a bearer token via a form-encoded POST with
    /// no auth header, persisting the token and username on success.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let form = [("username", username), ("password", password)];
        let res = self
            .client
            .post(self.url(routes::AUTH_TOKEN))
            .form(&form)
            .send()
            .await
            .map_err(ApiError::transport)?;

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            if let Some(detail) = extract_error_detail(&body) {
                return Err(ApiError::Server(detail));
            }
            return Err(ApiError::Server(format!("HTTP {}", status.as_u16())));
        }

        let token: TokenResponse = decode(res).await?;
        if let Err(err) = self.store.set(TOKEN_KEY, &token.access_token) {
            tracing::warn!(%err, "failed to persist bearer token");
        }
        if let Err(err) = self.store.set(USERNAME_KEY, username) {
            tracing::warn!(%err, "failed to persist username");
        }
        Ok(token)
    }

    /// Clears the stored token. Local only, no network call.
    pub fn logout(&self) {
        if let Err(err) = self.store.delete(TOKEN_KEY) {
            tracing::warn!(%err, "failed to clear stored token on logout");
        }
    }

    pub async fn get_current_user(&self) -> Result<User, ApiError> {
        self.get(routes::AUTH_ME).await
    }

    /// Lists peers in server order.
    pub async fn get_peers(&self) -> Result<Vec<Peer>, ApiError> {
        self.get(routes::PEERS).await
    }

    pub async fn get_peer(&self, id: i64) -> Result<Peer, ApiError> {
        self.get(&routes::peer(id)).await
    }

    /// Creates a peer; the server is authoritative for the assigned id.
    pub async fn create_peer(&self, req: &CreatePeerRequest) -> Result<Peer, ApiError> {
        self.post_json(routes::PEERS, req).await
    }

    /// PATCHes a peer; only fields set in `req` appear in the body.
    pub async fn update_peer(&self, id: i64, req: &UpdatePeerRequest) -> Result<Peer, ApiError> {
        self.patch_json(&routes::peer(id), req).await
    }

    /// Deletes a peer; the server answers 204 with no body. Any other
    /// success status means the server is not speaking the expected contract.
    pub async fn delete_peer(&self, id: i64) -> Result<(), ApiError> {
        let path = routes::peer(id);
        let res = self
            .send_authed(&path, self.client.delete(self.url(&path)))
            .await?;
        let status = res.status();
        if status != StatusCode::NO_CONTENT {
            return Err(ApiError::Server(format!("HTTP {}", status.as_u16())));
        }
        let _ = res.bytes().await;
        Ok(())
    }

    /// Flips the peer's enabled state server-side and returns the updated
    /// peer directly (no follow-up GET needed).
    pub async fn toggle_peer(&self, id: i64) -> Result<Peer, ApiError> {
        self.post_empty(&routes::peer_toggle(id)).await
    }

    pub async fn get_peer_config(&self, id: i64) -> Result<PeerConfig, ApiError> {
        self.get(&routes::peer_config(id)).await
    }

    pub async fn get_peer_stats(&self, id: i64) -> Result<PeerStatistics, ApiError> {
        self.get(&routes::peer_stats(id)).await
    }

    pub async fn get_server_stats(&self) -> Result<ServerStatistics, ApiError> {
        self.get(routes::SERVER_STATS).await
    }

    /// Liveness probe: no auth header, and any transport failure or non-200
    /// status yields `false` rather than an error.
    pub async fn health_check(&self) -> bool {
        match self.client.get(self.url(routes::HEALTH)).send().await {
            Ok(res) => res.status() == StatusCode::OK,
            Err(_) => false,
        }
    }
}

async fn decode<T>(res: Response) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let bytes = res.bytes().await.map_err(ApiError::transport)?;
    if bytes.is_empty() {
        return Err(ApiError::NoData);
    }
    serde_json::from_slice(&bytes).map_err(ApiError::Decoding)
}

fn classify_failure(status: StatusCode, body: &str) -> ApiError {
    if let Some(detail) = extract_error_detail(body) {
        return ApiError::Server(detail);
    }
    if status.is_client_error() {
        ApiError::Server(format!("Client error: {}", status.as_u16()))
    } else {
        ApiError::Server(format!("Server error: {}", status.as_u16()))
    }
}

fn extract_error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorDetail>(body)
        .ok()
        .map(|envelope| envelope.detail)
        .filter(|detail| !detail.trim().is_empty())
}
