use bluesky_client::{External, PostRecord};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use url::Url;

/// Build the link-card post announcing `uri`, stamped with the current time.
pub fn build_post(message: &str, uri: &str, title: &str, description: &str) -> PostRecord {
    build_post_at(message, uri, title, description, Utc::now())
}

/// Same as `build_post` with an explicit creation time.
pub fn build_post_at(
    message: &str,
    uri: &str,
    title: &str,
    description: &str,
    created_at: DateTime<Utc>,
) -> PostRecord {
    PostRecord::with_external_link(
        message,
        format_created_at(created_at),
        External {
            uri: uri.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        },
    )
}

/// RFC 3339 in UTC with a `Z` suffix; milliseconds only when non-zero.
pub fn format_created_at(created_at: DateTime<Utc>) -> String {
    created_at
        .trunc_subsecs(3)
        .to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Resolve a post's site-relative path against the configured site URL.
pub fn resolve_post_url(site_url: &str, path: &str) -> Result<Url, url::ParseError> {
    Url::parse(site_url)?.join(path)
}
