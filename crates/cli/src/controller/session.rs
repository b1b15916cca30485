use common::api::User;

use crate::api::PeerApi;

/// Tracks whether the operator has a usable session and who they are.
///
/// `is_authenticated` reflects token validity as last observed, not a live
/// guarantee; any later 401 invalidates the session at the store level and
/// the next `bootstrap` observes it.
pub struct SessionController {
    api: PeerApi,
    is_authenticated: bool,
    current_user: Option<User>,
    is_loading: bool,
    error_message: Option<String>,
}

impl SessionController {
    pub fn new(api: PeerApi) -> Self {
        Self {
            api,
            is_authenticated: false,
            current_user: None,
            is_loading: false,
            error_message: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Probes the stored token by fetching the current user. A missing or
    /// rejected token means no session; any other failure (the server being
    /// down, say) keeps the session and leaves the account record unloaded.
    pub async fn bootstrap(&mut self) {
        self.is_loading = true;
        match self.api.get_current_user().await {
            Ok(user) => {
                self.current_user = Some(user);
                self.is_authenticated = true;
            }
            Err(crate::api::ApiError::Unauthorized) => {
                self.current_user = None;
                self.is_authenticated = false;
            }
            Err(err) => {
                tracing::debug!(%err, "could not load account record at startup");
                self.current_user = None;
                self.is_authenticated = true;
            }
        }
        self.is_loading = false;
    }

    /// Logs in and fetches the account record. Authentication is only
    /// reported once both steps succeed; a failed user fetch after a good
    /// token leaves the session unauthenticated with the failure surfaced.
    pub async fn login(&mut self, username: &str, password: &str) {
        self.is_loading = true;
        self.error_message = None;

        let outcome = async {
            self.api.login(username, password).await?;
            self.api.get_current_user().await
        }
        .await;

        match outcome {
            Ok(user) => {
                self.current_user = Some(user);
                self.is_authenticated = true;
            }
            Err(err) => {
                self.error_message = Some(err.to_string());
                self.current_user = None;
                self.is_authenticated = false;
            }
        }
        self.is_loading = false;
    }

    /// Drops the stored token and all session state. Always succeeds.
    pub fn logout(&mut self) {
        self.api.logout();
        self.current_user = None;
        self.is_authenticated = false;
        self.error_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::credentials::{CredentialStore, MemoryCredentialStore, TOKEN_KEY};
    use reqwest::Client;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn spawn_script_server(replies: Vec<String>) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        thread::spawn(move || {
            for reply in replies {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
                let mut buf = [0_u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(reply.as_bytes());
            }
        });
        addr
    }

    fn response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        )
    }

    fn user_json() -> String {
        r#"{"id":1,"username":"alice","email":"alice@example.com",
            "is_active":true,"is_superuser":false,
            "created_at":"2024-01-01T00:00:00Z"}"#
            .to_string()
    }

    fn controller(addr: std::net::SocketAddr, store: Arc<MemoryCredentialStore>) -> SessionController {
        let api = PeerApi::new(Client::new(), format!("http://{addr}"), store).expect("api");
        SessionController::new(api)
    }

    #[tokio::test]
    async fn bootstrap_without_token_stays_logged_out() {
        let addr = spawn_script_server(vec![]);
        let store = Arc::new(MemoryCredentialStore::new());
        let mut session = controller(addr, store);

        session.bootstrap().await;
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
        assert!(session.error_message().is_none());
    }

    #[tokio::test]
    async fn bootstrap_drops_session_when_token_is_rejected() {
        let addr = spawn_script_server(vec![response("401 Unauthorized", "")]);
        let store = Arc::new(MemoryCredentialStore::with_token("stale"));
        let mut session = controller(addr, store.clone());

        session.bootstrap().await;
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
        assert!(store.get(TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn bootstrap_keeps_session_when_server_is_unreachable() {
        let store = Arc::new(MemoryCredentialStore::with_token("tok"));
        let api = PeerApi::new(Client::new(), "http://127.0.0.1:9", store).expect("api");
        let mut session = SessionController::new(api);

        session.bootstrap().await;
        assert!(session.is_authenticated());
        assert!(session.current_user().is_none());
        assert!(session.error_message().is_none());
    }

    #[tokio::test]
    async fn bootstrap_with_valid_token_loads_user() {
        let addr = spawn_script_server(vec![response("200 OK", &user_json())]);
        let store = Arc::new(MemoryCredentialStore::with_token("tok"));
        let mut session = controller(addr, store);

        session.bootstrap().await;
        assert!(session.is_authenticated());
        assert_eq!(session.current_user().map(|u| u.username.as_str()), Some("alice"));
    }

    #[tokio::test]
    async fn login_success_authenticates_and_loads_user() {
        let token = r#"{"access_token":"abc","token_type":"bearer"}"#;
        let addr = spawn_script_server(vec![
            response("200 OK", token),
            response("200 OK", &user_json()),
        ]);
        let store = Arc::new(MemoryCredentialStore::new());
        let mut session = controller(addr, store.clone());

        session.login("alice", "pw").await;
        assert!(session.is_authenticated());
        assert_eq!(session.current_user().map(|u| u.id), Some(1));
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn login_rejection_surfaces_error() {
        let addr = spawn_script_server(vec![response("401 Unauthorized", "")]);
        let store = Arc::new(MemoryCredentialStore::new());
        let mut session = controller(addr, store);

        session.login("alice", "wrong").await;
        assert!(!session.is_authenticated());
        assert_eq!(
            session.error_message(),
            Some(ApiError::Unauthorized.to_string().as_str())
        );
    }

    #[tokio::test]
    async fn login_with_failing_user_fetch_is_not_authenticated() {
        let token = r#"{"access_token":"abc","token_type":"bearer"}"#;
        let addr = spawn_script_server(vec![
            response("200 OK", token),
            response("500 Internal Server Error", ""),
        ]);
        let store = Arc::new(MemoryCredentialStore::new());
        let mut session = controller(addr, store);

        session.login("alice", "pw").await;
        assert!(!session.is_authenticated());
        assert_eq!(session.error_message(), Some("Server error: 500"));
    }

    #[tokio::test]
    async fn logout_clears_everything() {
        let addr = spawn_script_server(vec![response("200 OK", &user_json())]);
        let store = Arc::new(MemoryCredentialStore::with_token("tok"));
        let mut session = controller(addr, store.clone());

        session.bootstrap().await;
        assert!(session.is_authenticated());

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
        assert!(store.get(TOKEN_KEY).is_none());
    }
}
