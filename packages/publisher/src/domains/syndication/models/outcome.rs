use std::fmt;

/// Terminal state of one publish attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The id was already in the published set; nothing was sent
    AlreadyPublished,
    /// The post now exists on Bluesky and the id is recorded. `uri` and `cid`
    /// are empty when the PDS accepted the write with an unreadable response.
    Published { uri: String, cid: String },
    /// One or more required settings are absent; nothing was read or sent
    SkippedConfigMissing { missing: Vec<&'static str> },
    /// The attempt stopped early; see the warning log for the cause
    Failed(FailureReason),
}

impl PublishOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, PublishOutcome::Published { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// createSession was rejected or unreachable
    Auth,
    /// createRecord was rejected or unreachable
    Delivery,
    /// The plugin store could not be read or written
    Storage,
    /// `site_url` is set but cannot serve as a base URL
    InvalidSiteUrl,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureReason::Auth => "auth",
            FailureReason::Delivery => "delivery",
            FailureReason::Storage => "storage",
            FailureReason::InvalidSiteUrl => "invalid_site_url",
        };
        f.write_str(s)
    }
}
