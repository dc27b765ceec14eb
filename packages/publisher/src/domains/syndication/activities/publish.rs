use bluesky_client::CreateRecordResponse;
use tracing::{debug, error, info, warn};

use crate::config::PublisherSettings;
use crate::domains::syndication::activities::build_post::{build_post, resolve_post_url};
use crate::domains::syndication::error::{Result, SyndicationError};
use crate::domains::syndication::models::{
    ContentItem, FailureReason, PublishOutcome, PublishedSet,
};
use crate::kernel::PublisherDeps;

/// Announce a saved post on Bluesky, at most once per post id.
///
/// Never fails: every problem is logged and reported through the returned
/// outcome, so a syndication failure cannot break the save that triggered it.
/// The published set only changes after createRecord succeeded.
///
/// Two concurrent calls for the same id can both post; callers that may fire
/// duplicate save events must serialize per id.
pub async fn publish(
    item: &ContentItem,
    settings: &PublisherSettings,
    deps: &PublisherDeps,
) -> PublishOutcome {
    let missing = settings.missing_keys();
    if !missing.is_empty() {
        warn!(
            item_id = %item.id,
            "Bluesky publisher is not configured correctly. Missing settings: {}",
            missing.join(" ")
        );
        return PublishOutcome::SkippedConfigMissing { missing };
    }

    match try_publish(item, settings, deps).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(item_id = %item.id, reason = %e.reason(), error = %e, "Bluesky publish skipped");
            PublishOutcome::Failed(e.reason())
        }
    }
}

async fn try_publish(
    item: &ContentItem,
    settings: &PublisherSettings,
    deps: &PublisherDeps,
) -> Result<PublishOutcome> {
    let mut data = deps
        .store
        .get_data(&deps.namespace)
        .await
        .map_err(SyndicationError::Storage)?;
    let mut published = PublishedSet::from_data(&data).map_err(SyndicationError::Storage)?;

    if published.contains(item.id) {
        debug!(item_id = %item.id, "Post already published to Bluesky");
        return Ok(PublishOutcome::AlreadyPublished);
    }

    let uri = resolve_post_url(&settings.site_url, &item.path).map_err(|source| {
        SyndicationError::InvalidSiteUrl {
            site_url: settings.site_url.clone(),
            source,
        }
    })?;

    let credentials = settings.credentials();
    let session = deps
        .bluesky
        .create_session(&credentials)
        .await
        .map_err(SyndicationError::Authentication)?;

    let post = build_post(
        &settings.post_message,
        uri.as_str(),
        &settings.site_title,
        &item.title,
    );

    // Once this request is sent the post may exist remotely, whatever happens next
    let created = match deps
        .bluesky
        .create_post(&credentials.pds_url, &session, &post)
        .await
    {
        Ok(created) => created,
        // A 2xx means the record exists; record the id so it is not posted twice
        Err(e) if e.is_accepted() => {
            warn!(
                item_id = %item.id,
                error = %e,
                "Bluesky accepted the post but its response could not be read"
            );
            CreateRecordResponse {
                uri: String::new(),
                cid: String::new(),
            }
        }
        Err(e) => return Err(SyndicationError::Delivery(e)),
    };

    info!(
        item_id = %item.id,
        uri = %created.uri,
        link = %uri,
        "Published post to Bluesky"
    );

    published.insert(item.id);
    published.write_into(&mut data);

    if let Err(e) = deps.store.save_data(&deps.namespace, data).await {
        let cause = format!("{:#}", e);
        error!(
            item_id = %item.id,
            uri = %created.uri,
            error = %cause,
            "Post is live on Bluesky but was not recorded as published; the next save may post it again"
        );
        return Ok(PublishOutcome::Failed(FailureReason::Storage));
    }

    Ok(PublishOutcome::Published {
        uri: created.uri,
        cid: created.cid,
    })
}
