//! Publisher dependencies (using traits for testability)
//!
//! The central dependency container handed to the publish pipeline.
//! All external services use trait abstractions so tests can swap in fakes.

use async_trait::async_trait;
use bluesky_client::{BlueskyClient, BlueskyError, CreateRecordResponse, PostRecord, Session};
use std::sync::Arc;

use crate::config::Credentials;
use crate::kernel::{BaseBlueskyService, BasePluginStore};

/// Store namespace used when the host does not pick one
pub const DEFAULT_NAMESPACE: &str = "publish_bluesky";

// =============================================================================
// BlueskyClient Adapter (implements BaseBlueskyService trait)
// =============================================================================

/// Wrapper around a shared HTTP client that talks to whichever PDS the
/// credentials point at
#[derive(Clone, Default)]
pub struct BlueskyAdapter {
    http_client: reqwest::Client,
}

impl BlueskyAdapter {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    fn client_for(&self, pds_url: &str) -> BlueskyClient {
        BlueskyClient::with_http_client(self.http_client.clone(), pds_url)
    }
}

#[async_trait]
impl BaseBlueskyService for BlueskyAdapter {
    async fn create_session(&self, credentials: &Credentials) -> Result<Session, BlueskyError> {
        self.client_for(&credentials.pds_url)
            .create_session(&credentials.handle, &credentials.app_password)
            .await
    }

    async fn create_post(
        &self,
        pds_url: &str,
        session: &Session,
        post: &PostRecord,
    ) -> Result<CreateRecordResponse, BlueskyError> {
        self.client_for(pds_url).create_post(session, post).await
    }
}

// =============================================================================
// PublisherDeps
// =============================================================================

#[derive(Clone)]
pub struct PublisherDeps {
    pub bluesky: Arc<dyn BaseBlueskyService>,
    pub store: Arc<dyn BasePluginStore>,
    /// Store namespace holding `published_posts`
    pub namespace: String,
}

impl PublisherDeps {
    pub fn new(bluesky: Arc<dyn BaseBlueskyService>, store: Arc<dyn BasePluginStore>) -> Self {
        Self {
            bluesky,
            store,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}
