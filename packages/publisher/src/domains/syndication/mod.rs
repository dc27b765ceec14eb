//! Syndication domain - announce saved posts on Bluesky exactly once.

pub mod activities;
pub mod error;
pub mod models;

pub use activities::{build_post, build_post_at, publish};
pub use error::SyndicationError;
pub use models::{ContentId, ContentItem, FailureReason, PublishOutcome, PublishedSet};
