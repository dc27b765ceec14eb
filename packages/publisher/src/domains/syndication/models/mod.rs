pub mod content_item;
pub mod outcome;
pub mod published_set;

pub use content_item::{ContentId, ContentItem};
pub use outcome::{FailureReason, PublishOutcome};
pub use published_set::{PublishedSet, PUBLISHED_POSTS_KEY};
