// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no syndication logic.
// The publish pipeline in domains::syndication is written against these traits.
//
// Naming convention: Base* for trait names (e.g., BaseBlueskyService)

use anyhow::Result;
use async_trait::async_trait;
use bluesky_client::{BlueskyError, CreateRecordResponse, PostRecord, Session};
use serde_json::{Map, Value};

use crate::config::Credentials;

// =============================================================================
// Bluesky Service Trait (Infrastructure - session + record creation)
// =============================================================================

#[async_trait]
pub trait BaseBlueskyService: Send + Sync {
    /// Open a fresh session on `credentials.pds_url` (no caching)
    async fn create_session(&self, credentials: &Credentials) -> Result<Session, BlueskyError>;

    /// Create an `app.bsky.feed.post` record in the session's repository
    async fn create_post(
        &self,
        pds_url: &str,
        session: &Session,
        post: &PostRecord,
    ) -> Result<CreateRecordResponse, BlueskyError>;
}

// =============================================================================
// Plugin Store Trait (Infrastructure - namespaced key/value data)
// =============================================================================

/// Durable key/value data, one JSON object per namespace.
#[async_trait]
pub trait BasePluginStore: Send + Sync {
    /// Read the namespace's data (empty when nothing was saved yet)
    async fn get_data(&self, namespace: &str) -> Result<Map<String, Value>>;

    /// Replace the namespace's data
    async fn save_data(&self, namespace: &str, data: Map<String, Value>) -> Result<()>;
}
