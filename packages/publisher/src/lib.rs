// Bluesky Publisher - syndication core
//
// Announces a saved blog post on Bluesky exactly once. The host (a CMS hook,
// the `publish` binary, a job runner) hands a ContentItem to
// `domains::syndication::publish`; everything the pipeline touches outside
// itself goes through the kernel traits.

pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
pub use domains::syndication::{publish, ContentId, ContentItem, FailureReason, PublishOutcome};
