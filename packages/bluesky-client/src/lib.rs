//! Pure Bluesky / AT Protocol XRPC client.
//!
//! A minimal client for a Personal Data Server (PDS). Supports creating an
//! app-password session and writing records into the account's repository.
//!
//! # Example
//!
//! ```rust,ignore
//! use bluesky_client::{BlueskyClient, External, PostRecord};
//!
//! let client = BlueskyClient::new("https://bsky.social");
//! let session = client.create_session("alice.bsky.social", "app-password").await?;
//!
//! let record = PostRecord::with_external_link(
//!     "New on the blog",
//!     "2024-01-01T00:00:00Z",
//!     External {
//!         uri: "https://example.com/posts/hello/".into(),
//!         title: "Example Blog".into(),
//!         description: "Hello".into(),
//!     },
//! );
//! let created = client.create_post(&session, &record).await?;
//! println!("{}", created.uri);
//! ```

pub mod error;
pub mod types;

pub use error::{BlueskyError, Result};
pub use types::{
    CreateRecordResponse, External, ExternalEmbed, PostRecord, Session, EXTERNAL_EMBED_TYPE,
    POST_COLLECTION,
};

use serde::{de::DeserializeOwned, Serialize};
use types::{CreateRecordRequest, CreateSessionRequest, XrpcErrorBody};

/// Default PDS used by Bluesky-hosted accounts.
pub const DEFAULT_PDS_URL: &str = "https://bsky.social";

const CREATE_SESSION: &str = "com.atproto.server.createSession";
const CREATE_RECORD: &str = "com.atproto.repo.createRecord";

#[derive(Debug, Clone)]
pub struct BlueskyClient {
    client: reqwest::Client,
    base_url: String,
}

impl BlueskyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Use a preconfigured HTTP client (timeouts, proxies, user agent).
    pub fn with_http_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn xrpc_url(&self, method: &str) -> String {
        format!("{}/xrpc/{}", self.base_url, method)
    }

    /// Exchange a handle and app password for an access token.
    pub async fn create_session(&self, identifier: &str, password: &str) -> Result<Session> {
        let body = CreateSessionRequest {
            identifier,
            password,
        };

        tracing::debug!(pds = %self.base_url, identifier, "Creating Bluesky session");

        let resp = self
            .client
            .post(self.xrpc_url(CREATE_SESSION))
            .json(&body)
            .send()
            .await?;

        read_json(resp).await
    }

    /// Write a record into the session account's repository.
    pub async fn create_record<R: Serialize>(
        &self,
        session: &Session,
        collection: &str,
        record: &R,
    ) -> Result<CreateRecordResponse> {
        let body = CreateRecordRequest {
            repo: &session.did,
            collection,
            record,
        };

        tracing::debug!(pds = %self.base_url, repo = %session.did, collection, "Creating record");

        let resp = self
            .client
            .post(self.xrpc_url(CREATE_RECORD))
            .bearer_auth(&session.access_jwt)
            .json(&body)
            .send()
            .await?;

        read_json(resp).await
    }

    /// Create an `app.bsky.feed.post` record.
    pub async fn create_post(
        &self,
        session: &Session,
        post: &PostRecord,
    ) -> Result<CreateRecordResponse> {
        self.create_record(session, POST_COLLECTION, post).await
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(BlueskyError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    let unreadable = |message: String| BlueskyError::Unreadable {
        status: status.as_u16(),
        message,
    };

    let body = resp
        .text()
        .await
        .map_err(|e| unreadable(format!("Failed to read response body: {}", e)))?;
    serde_json::from_str(&body)
        .map_err(|e| unreadable(format!("Unexpected response body: {}", e)))
}

/// Render an XRPC error body as `Error: message`, falling back to the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<XrpcErrorBody>(body) {
        Ok(XrpcErrorBody {
            error,
            message: Some(message),
        }) => format!("{}: {}", error, message),
        Ok(XrpcErrorBody { error, .. }) => error,
        Err(_) => body.to_string(),
    }
}
