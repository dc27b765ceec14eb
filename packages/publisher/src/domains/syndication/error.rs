//! Errors raised inside the publish pipeline.
//!
//! None of these escape `publish`: each one is logged and mapped onto
//! `PublishOutcome::Failed` at the pipeline boundary.

use bluesky_client::BlueskyError;
use thiserror::Error;

use super::models::FailureReason;

pub type Result<T> = std::result::Result<T, SyndicationError>;

#[derive(Debug, Error)]
pub enum SyndicationError {
    #[error("Login to Bluesky failed: {0}")]
    Authentication(#[source] BlueskyError),

    #[error("Posting to Bluesky failed: {0}")]
    Delivery(#[source] BlueskyError),

    #[error("Plugin store error: {0:#}")]
    Storage(#[source] anyhow::Error),

    #[error("Invalid site URL {site_url:?}: {source}")]
    InvalidSiteUrl {
        site_url: String,
        #[source]
        source: url::ParseError,
    },
}

impl SyndicationError {
    pub fn reason(&self) -> FailureReason {
        match self {
            SyndicationError::Authentication(_) => FailureReason::Auth,
            SyndicationError::Delivery(_) => FailureReason::Delivery,
            SyndicationError::Storage(_) => FailureReason::Storage,
            SyndicationError::InvalidSiteUrl { .. } => FailureReason::InvalidSiteUrl,
        }
    }
}
