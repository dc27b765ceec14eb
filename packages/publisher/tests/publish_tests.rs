//! Publish pipeline tests against mock Bluesky and in-memory store.

mod common;

use common::*;
use publisher_core::kernel::{MemoryPluginStore, MockBlueskyService, TestDependencies};
use publisher_core::{publish, ContentId, ContentItem, FailureReason, PublishOutcome, PublisherSettings};
use serde_json::json;

#[tokio::test]
async fn fresh_post_is_published_and_recorded() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    assert!(published_ids(&test_deps.store.snapshot(namespace())).is_empty());

    let outcome = publish(&hello_post(), &configured_settings(), &deps).await;

    assert_eq!(
        outcome,
        PublishOutcome::Published {
            uri: "at://did:plc:mock/app.bsky.feed.post/mock1".to_string(),
            cid: "bafymock1".to_string(),
        }
    );
    assert_eq!(
        published_ids(&test_deps.store.snapshot(namespace())),
        vec![ContentId::new(42)]
    );
}

#[tokio::test]
async fn published_record_carries_message_link_and_titles() {
    let test_deps = TestDependencies::new();

    publish(&hello_post(), &configured_settings(), &test_deps.deps()).await;

    let sessions = test_deps.bluesky.session_calls();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].handle, "alice.bsky.social");
    assert_eq!(sessions[0].app_password, "abcd-efgh-ijkl-mnop");
    assert_eq!(sessions[0].pds_url, "https://pds.example.com");

    let posts = test_deps.bluesky.post_calls();
    assert_eq!(posts.len(), 1);
    let call = &posts[0];
    assert_eq!(call.pds_url, "https://pds.example.com");
    assert_eq!(call.session.access_jwt, "jwt-for-alice.bsky.social");
    assert_eq!(call.post.text, "New post!");
    assert!(call.post.created_at.ends_with('Z'));
    assert_eq!(
        serde_json::to_value(&call.post.embed).unwrap(),
        json!({
            "$type": "app.bsky.embed.external",
            "external": {
                "uri": "https://blog.example.com/2024/01/hello-world/",
                "title": "Alice's Blog",
                "description": "Hello, world"
            }
        })
    );
}

#[tokio::test]
async fn already_published_post_makes_no_network_calls() {
    let test_deps = TestDependencies::new().mock_store(
        MemoryPluginStore::new().with_data(namespace(), json!({ "published_posts": [7, 42] })),
    );

    let outcome = publish(&hello_post(), &configured_settings(), &test_deps.deps()).await;

    assert_eq!(outcome, PublishOutcome::AlreadyPublished);
    assert_eq!(test_deps.bluesky.network_calls(), 0);
    assert_eq!(test_deps.store.save_calls(), 0);
}

#[tokio::test]
async fn missing_settings_skip_without_touching_store_or_network() {
    let cases: Vec<(PublisherSettings, Vec<&str>)> = vec![
        (
            PublisherSettings {
                handle: String::new(),
                ..configured_settings()
            },
            vec!["handle"],
        ),
        (
            PublisherSettings {
                app_password: String::new(),
                ..configured_settings()
            },
            vec!["app_password"],
        ),
        (
            PublisherSettings {
                site_url: " ".to_string(),
                ..configured_settings()
            },
            vec!["site_url"],
        ),
        (
            PublisherSettings::default(),
            vec!["handle", "app_password", "site_url"],
        ),
    ];

    for (settings, expected_missing) in cases {
        // Membership must not matter: seed one store with the id and leave one empty
        for seeded in [false, true] {
            let mut store = MemoryPluginStore::new();
            if seeded {
                store = store.with_data(namespace(), json!({ "published_posts": [42] }));
            }
            let test_deps = TestDependencies::new().mock_store(store);

            let outcome = publish(&hello_post(), &settings, &test_deps.deps()).await;

            assert_eq!(
                outcome,
                PublishOutcome::SkippedConfigMissing {
                    missing: expected_missing.clone()
                }
            );
            assert_eq!(test_deps.bluesky.network_calls(), 0);
            assert_eq!(test_deps.store.get_calls(), 0);
            assert_eq!(test_deps.store.save_calls(), 0);
        }
    }
}

#[tokio::test]
async fn rejected_login_fails_with_auth_and_leaves_set_unchanged() {
    let test_deps = TestDependencies::new()
        .mock_bluesky(MockBlueskyService::new().reject_sessions(401))
        .mock_store(
            MemoryPluginStore::new().with_data(namespace(), json!({ "published_posts": [1] })),
        );

    let outcome = publish(&hello_post(), &configured_settings(), &test_deps.deps()).await;

    assert_eq!(outcome, PublishOutcome::Failed(FailureReason::Auth));
    assert!(test_deps.bluesky.post_calls().is_empty());
    assert_eq!(test_deps.store.save_calls(), 0);
    assert_eq!(
        published_ids(&test_deps.store.snapshot(namespace())),
        vec![ContentId::new(1)]
    );
}

#[tokio::test]
async fn rejected_post_fails_with_delivery_and_leaves_set_unchanged() {
    let test_deps = TestDependencies::new()
        .mock_bluesky(MockBlueskyService::new().reject_posts(500));

    let outcome = publish(&hello_post(), &configured_settings(), &test_deps.deps()).await;

    assert_eq!(outcome, PublishOutcome::Failed(FailureReason::Delivery));
    assert_eq!(test_deps.bluesky.post_calls().len(), 1);
    assert_eq!(test_deps.store.save_calls(), 0);
    assert!(published_ids(&test_deps.store.snapshot(namespace())).is_empty());
}

#[tokio::test]
async fn failed_delivery_leaves_post_eligible_for_a_later_save() {
    let test_deps = TestDependencies::new()
        .mock_bluesky(MockBlueskyService::new().reject_posts(503));
    let deps = test_deps.deps();

    let first = publish(&hello_post(), &configured_settings(), &deps).await;
    test_deps.bluesky.accept_posts();
    let second = publish(&hello_post(), &configured_settings(), &deps).await;

    assert_eq!(first, PublishOutcome::Failed(FailureReason::Delivery));
    assert!(second.is_published());
    assert_eq!(test_deps.bluesky.post_calls().len(), 2);
    assert_eq!(
        published_ids(&test_deps.store.snapshot(namespace())),
        vec![ContentId::new(42)]
    );
}

#[tokio::test]
async fn publishing_twice_delivers_once() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    let first = publish(&hello_post(), &configured_settings(), &deps).await;
    let second = publish(&hello_post(), &configured_settings(), &deps).await;

    assert!(first.is_published());
    assert_eq!(second, PublishOutcome::AlreadyPublished);
    assert_eq!(test_deps.bluesky.post_calls().len(), 1);
    assert_eq!(test_deps.bluesky.session_calls().len(), 1);
}

#[tokio::test]
async fn distinct_posts_are_appended_in_publish_order() {
    let test_deps = TestDependencies::new().mock_store(
        MemoryPluginStore::new()
            .with_data(namespace(), json!({ "published_posts": [3], "other": "kept" })),
    );
    let deps = test_deps.deps();

    for id in [10_i64, 4] {
        let item = ContentItem::new(id, format!("Post {}", id), format!("/posts/{}/", id));
        assert!(publish(&item, &configured_settings(), &deps).await.is_published());
    }

    let snapshot = test_deps.store.snapshot(namespace());
    assert_eq!(
        published_ids(&snapshot),
        vec![ContentId::new(3), ContentId::new(10), ContentId::new(4)]
    );
    assert_eq!(snapshot.get("other"), Some(&json!("kept")));
}

#[tokio::test]
async fn unreadable_store_fails_before_any_network_call() {
    let test_deps =
        TestDependencies::new().mock_store(MemoryPluginStore::new().failing_reads());

    let outcome = publish(&hello_post(), &configured_settings(), &test_deps.deps()).await;

    assert_eq!(outcome, PublishOutcome::Failed(FailureReason::Storage));
    assert_eq!(test_deps.bluesky.network_calls(), 0);
}

#[tokio::test]
async fn unsaveable_store_after_delivery_reports_storage_failure() {
    let test_deps =
        TestDependencies::new().mock_store(MemoryPluginStore::new().failing_saves());

    let outcome = publish(&hello_post(), &configured_settings(), &test_deps.deps()).await;

    assert_eq!(outcome, PublishOutcome::Failed(FailureReason::Storage));
    assert_eq!(test_deps.bluesky.post_calls().len(), 1);
    assert_eq!(test_deps.store.save_calls(), 1);
    assert!(published_ids(&test_deps.store.snapshot(namespace())).is_empty());
}

#[tokio::test]
async fn relative_site_url_fails_before_any_network_call() {
    let settings = PublisherSettings {
        site_url: "blog.example.com".to_string(),
        ..configured_settings()
    };
    let test_deps = TestDependencies::new();

    let outcome = publish(&hello_post(), &settings, &test_deps.deps()).await;

    assert_eq!(outcome, PublishOutcome::Failed(FailureReason::InvalidSiteUrl));
    assert_eq!(test_deps.bluesky.network_calls(), 0);
}

#[tokio::test]
async fn custom_namespace_is_used_for_tracking() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps().with_namespace("bluesky_staging");

    publish(&hello_post(), &configured_settings(), &deps).await;

    assert!(published_ids(&test_deps.store.snapshot(namespace())).is_empty());
    assert_eq!(
        published_ids(&test_deps.store.snapshot("bluesky_staging")),
        vec![ContentId::new(42)]
    );
}
