//! Settings and content fixtures shared by the publish tests.

use publisher_core::{ContentId, ContentItem, PublisherSettings};
use serde_json::Value;

use publisher_core::kernel::DEFAULT_NAMESPACE;

/// Fully configured settings pointing at a fake PDS
pub fn configured_settings() -> PublisherSettings {
    PublisherSettings {
        handle: "alice.bsky.social".to_string(),
        app_password: "abcd-efgh-ijkl-mnop".to_string(),
        site_url: "https://blog.example.com".to_string(),
        pds_url: "https://pds.example.com".to_string(),
        post_message: "New post!".to_string(),
        site_title: "Alice's Blog".to_string(),
    }
}

pub fn hello_post() -> ContentItem {
    ContentItem::new(42_i64, "Hello, world", "/2024/01/hello-world/")
}

/// Ids recorded under `published_posts` in the default namespace
pub fn published_ids(snapshot: &serde_json::Map<String, Value>) -> Vec<ContentId> {
    snapshot
        .get("published_posts")
        .map(|v| serde_json::from_value(v.clone()).unwrap())
        .unwrap_or_default()
}

pub fn namespace() -> &'static str {
    DEFAULT_NAMESPACE
}
