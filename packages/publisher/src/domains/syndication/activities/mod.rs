pub mod build_post;
pub mod publish;

pub use build_post::{build_post, build_post_at, format_created_at, resolve_post_url};
pub use publish::publish;
