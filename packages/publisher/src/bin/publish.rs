// Announce one saved post on Bluesky.
//
// Minimal host for the publish pipeline: settings come from the environment,
// the post from the command line, and published ids live in a JSON file.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use publisher_core::kernel::{BlueskyAdapter, JsonFileStore, PublisherDeps, DEFAULT_NAMESPACE};
use publisher_core::{publish, ContentItem, PublishOutcome, PublisherSettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "publish", about = "Announce a saved blog post on Bluesky")]
struct Args {
    /// Post id assigned by the CMS
    #[arg(long)]
    id: i64,

    /// Post title, used as the link card description
    #[arg(long)]
    title: String,

    /// Site-relative path of the post
    #[arg(long)]
    path: String,

    /// JSON file recording which posts were already published
    #[arg(long, default_value = "bluesky_publisher.json")]
    store: String,

    /// Namespace inside the store file
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,publisher_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let settings = PublisherSettings::from_env();
    tracing::info!(pds = %settings.pds_url, site = %settings.site_url, "Configuration loaded");

    let store = JsonFileStore::new(&args.store);
    tracing::info!(store = %store.path().display(), namespace = %args.namespace, "Using plugin store");

    let deps = PublisherDeps::new(Arc::new(BlueskyAdapter::default()), Arc::new(store))
        .with_namespace(args.namespace);

    let item = ContentItem::new(args.id, args.title, args.path);
    let outcome = publish(&item, &settings, &deps).await;
    tracing::info!(item_id = %item.id, outcome = ?outcome, "Publish finished");

    Ok(match outcome {
        PublishOutcome::Failed(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
