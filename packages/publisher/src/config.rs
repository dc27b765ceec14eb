use dotenvy::dotenv;
use std::collections::HashMap;
use std::env;

use bluesky_client::DEFAULT_PDS_URL;

/// Message used when `post_message` is not configured
pub const DEFAULT_POST_MESSAGE: &str = "🚀 I created a new blog post!";

/// Required option names, in the order they are reported when missing
pub const REQUIRED_KEYS: [&str; 3] = ["handle", "app_password", "site_url"];

/// Publisher settings.
///
/// Required values are kept as plain strings so that an unconfigured publisher
/// can still be constructed; `missing_keys` decides whether it may run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherSettings {
    pub handle: String,
    pub app_password: String,
    pub site_url: String,
    pub pds_url: String,
    pub post_message: String,
    /// Embed card title, usually the site's name
    pub site_title: String,
}

impl Default for PublisherSettings {
    fn default() -> Self {
        Self {
            handle: String::new(),
            app_password: String::new(),
            site_url: String::new(),
            pds_url: DEFAULT_PDS_URL.to_string(),
            post_message: DEFAULT_POST_MESSAGE.to_string(),
            site_title: String::new(),
        }
    }
}

impl PublisherSettings {
    /// Load settings from environment variables
    pub fn from_env() -> Self {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from environment-style variables supplied by `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string());
        let defaults = Self::default();
        Self {
            handle: get("BLUESKY_HANDLE").unwrap_or_default(),
            app_password: get("BLUESKY_APP_PASSWORD").unwrap_or_default(),
            site_url: get("SITE_URL").unwrap_or_default(),
            pds_url: get("BLUESKY_PDS_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.pds_url),
            post_message: lookup("BLUESKY_POST_MESSAGE").unwrap_or(defaults.post_message),
            site_title: get("SITE_TITLE").unwrap_or_default(),
        }
    }

    /// Build settings from a plugin settings mapping (`handle`, `app_password`,
    /// `site_url`, `pds_url`, `post_message`, `site_title`)
    pub fn from_map(values: &HashMap<String, String>) -> Self {
        let get = |key: &str| values.get(key).map(|v| v.trim().to_string());
        let defaults = Self::default();
        Self {
            handle: get("handle").unwrap_or_default(),
            app_password: get("app_password").unwrap_or_default(),
            site_url: get("site_url").unwrap_or_default(),
            pds_url: get("pds_url")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.pds_url),
            post_message: values
                .get("post_message")
                .cloned()
                .unwrap_or(defaults.post_message),
            site_title: get("site_title").unwrap_or_default(),
        }
    }

    /// Names of required options that are absent or blank
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let values = [&self.handle, &self.app_password, &self.site_url];
        REQUIRED_KEYS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| *key)
            .collect()
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            handle: self.handle.clone(),
            app_password: self.app_password.clone(),
            pds_url: self.pds_url.clone(),
        }
    }
}

/// Account credentials used to open a session on the PDS
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub handle: String,
    pub app_password: String,
    pub pds_url: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("handle", &self.handle)
            .field("app_password", &"<redacted>")
            .field("pds_url", &self.pds_url)
            .finish()
    }
}
