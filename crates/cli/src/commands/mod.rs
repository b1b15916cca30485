use std::sync::Arc;

use crate::api::PeerApi;
use crate::credentials::CredentialStore;

pub mod auth;
pub mod completions;
pub mod health;
pub mod peers;
pub mod stats;
pub mod status;

#[derive(Clone)]
pub struct CommandContext {
    pub client: reqwest::Client,
    pub base: String,
    pub store: Arc<dyn CredentialStore>,
}

impl CommandContext {
    pub fn new(client: reqwest::Client, base: String, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            client,
            base,
            store,
        }
    }

    pub fn api(&self) -> anyhow::Result<PeerApi> {
        Ok(PeerApi::new(
            self.client.clone(),
            self.base.clone(),
            self.store.clone(),
        )?)
    }
}
