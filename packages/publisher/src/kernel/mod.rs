//! Kernel module - publisher infrastructure and dependencies.

pub mod deps;
pub mod json_store;
pub mod test_dependencies;
pub mod traits;

pub use deps::{BlueskyAdapter, PublisherDeps, DEFAULT_NAMESPACE};
pub use json_store::JsonFileStore;
pub use test_dependencies::{
    CreatePostCall, MemoryPluginStore, MockBlueskyService, TestDependencies,
};
pub use traits::*;
