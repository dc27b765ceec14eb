//! XRPC request and response types.

use serde::{Deserialize, Serialize};

/// Lexicon id of a feed post record (also its collection name).
pub const POST_COLLECTION: &str = "app.bsky.feed.post";

/// Lexicon id of an external link card embed.
pub const EXTERNAL_EMBED_TYPE: &str = "app.bsky.embed.external";

// =============================================================================
// com.atproto.server.createSession
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionRequest<'a> {
    /// Handle, DID or email of the account
    pub identifier: &'a str,
    /// App password
    pub password: &'a str,
}

/// Authenticated session returned by `createSession`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    #[serde(rename = "accessJwt")]
    pub access_jwt: String,
    #[serde(rename = "refreshJwt", default)]
    pub refresh_jwt: Option<String>,
    pub did: String,
    #[serde(default)]
    pub handle: Option<String>,
}

// =============================================================================
// com.atproto.repo.createRecord
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateRecordRequest<'a, R> {
    pub repo: &'a str,
    pub collection: &'a str,
    pub record: &'a R,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateRecordResponse {
    /// `at://` URI of the new record
    pub uri: String,
    pub cid: String,
}

/// An `app.bsky.feed.post` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    #[serde(rename = "$type")]
    pub record_type: String,
    pub text: String,
    /// RFC 3339 UTC timestamp with a `Z` suffix
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub embed: ExternalEmbed,
}

impl PostRecord {
    /// Post with a link card pointing at `uri`.
    pub fn with_external_link(
        text: impl Into<String>,
        created_at: impl Into<String>,
        external: External,
    ) -> Self {
        Self {
            record_type: POST_COLLECTION.to_string(),
            text: text.into(),
            created_at: created_at.into(),
            embed: ExternalEmbed {
                embed_type: EXTERNAL_EMBED_TYPE.to_string(),
                external,
            },
        }
    }
}

/// An `app.bsky.embed.external` embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalEmbed {
    #[serde(rename = "$type")]
    pub embed_type: String,
    pub external: External,
}

/// Link card contents. `description` is always serialized, even when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct External {
    pub uri: String,
    pub title: String,
    pub description: String,
}

// =============================================================================
// Errors
// =============================================================================

/// Error body returned by XRPC endpoints on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct XrpcErrorBody {
    pub error: String,
    #[serde(default)]
    pub message: Option<String>,
}
