//! Cache lifecycle over in-memory fakes: hit/miss accounting, write-path
//! invalidation, TTL expiry, and rebuild failure handling.

mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use quotedrift::application::feed::FeedRequest;
use quotedrift::application::quotes::{QuoteDraft, QuoteError};
use quotedrift::cache::{CacheConfig, FilterKey};
use quotedrift::domain::types::EngagementKind;

use common::{build_app, default_app};

fn draft(text: &str) -> QuoteDraft {
    QuoteDraft {
        text: text.to_string(),
        author: String::new(),
        category_id: None,
    }
}

#[tokio::test]
async fn repeat_reads_are_served_from_the_pool_cache() {
    let app = default_app();
    app.store.add_system_quote("cached", "Anon", None);

    for _ in 0..3 {
        app.feed
            .assemble(FeedRequest::default())
            .await
            .expect("assemble");
    }

    assert_eq!(app.store.system_list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn quote_creation_invalidates_every_pool_key() {
    let app = default_app();
    let creator = app.store.add_user("Robin");
    let wisdom = app.store.add_category("Wisdom", "\u{1F989}");
    app.store.add_system_quote("wise", "Sage", Some(wisdom));

    // Warm two distinct pool entries.
    app.feed
        .assemble(FeedRequest::default())
        .await
        .expect("warm all");
    app.feed
        .assemble(FeedRequest {
            category_names: vec!["Wisdom".to_string()],
            ..Default::default()
        })
        .await
        .expect("warm filtered");
    assert_eq!(app.store.system_list_calls.load(Ordering::SeqCst), 2);

    app.quotes
        .create(creator, draft("fresh words"), true)
        .await
        .expect("create quote");

    let envelope = app
        .feed
        .assemble(FeedRequest {
            limit: Some(0),
            ..Default::default()
        })
        .await
        .expect("reassemble all");

    // Rebuilt, and the new quote is already visible.
    assert_eq!(app.store.system_list_calls.load(Ordering::SeqCst), 3);
    assert!(envelope.quotes.iter().any(|q| q.text == "fresh words"));
}

#[tokio::test]
async fn visibility_flip_is_visible_on_the_next_read() {
    let app = default_app();
    let creator = app.store.add_user("Robin");
    let record = app
        .quotes
        .create(creator, draft("now you see me"), true)
        .await
        .expect("create quote");

    let before = app
        .feed
        .assemble(FeedRequest::default())
        .await
        .expect("assemble");
    assert_eq!(before.quotes.len(), 1);

    app.quotes
        .set_visibility(creator, record.id, false)
        .await
        .expect("hide quote");

    let after = app
        .feed
        .assemble(FeedRequest::default())
        .await
        .expect("reassemble");
    assert!(after.quotes.is_empty());
}

#[tokio::test]
async fn failed_write_leaves_the_cache_untouched() {
    let app = default_app();
    let creator = app.store.add_user("Robin");
    app.store.add_system_quote("cached", "Anon", None);

    app.feed
        .assemble(FeedRequest::default())
        .await
        .expect("warm cache");

    let result = app.quotes.create(creator, draft("   "), true).await;
    assert!(matches!(result, Err(QuoteError::Validation(_))));

    app.feed
        .assemble(FeedRequest::default())
        .await
        .expect("assemble again");
    assert_eq!(app.store.system_list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn engagement_write_invalidates_only_that_users_overlay() {
    let app = default_app();
    let alice = app.store.add_user("Alice");
    let bob = app.store.add_user("Bob");
    let quote_id = app.store.add_system_quote("liked soon", "Anon", None);

    // Warm both overlays.
    for viewer in [alice, bob] {
        app.feed
            .assemble(FeedRequest {
                viewer: Some(viewer),
                ..Default::default()
            })
            .await
            .expect("warm overlay");
    }
    assert_eq!(app.store.liked_ids_calls.load(Ordering::SeqCst), 2);

    app.engagement
        .set(alice, quote_id, EngagementKind::Like, true)
        .await
        .expect("like quote");

    // Alice sees her like immediately, via a fresh overlay.
    let for_alice = app
        .feed
        .assemble(FeedRequest {
            viewer: Some(alice),
            ..Default::default()
        })
        .await
        .expect("assemble as alice");
    assert!(for_alice.quotes[0].is_liked);
    assert_eq!(app.store.liked_ids_calls.load(Ordering::SeqCst), 3);

    // Bob's overlay entry was not touched.
    app.feed
        .assemble(FeedRequest {
            viewer: Some(bob),
            ..Default::default()
        })
        .await
        .expect("assemble as bob");
    assert_eq!(app.store.liked_ids_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn engagement_writes_do_not_clear_pools() {
    let app = default_app();
    let alice = app.store.add_user("Alice");
    let quote_id = app.store.add_system_quote("stable counts", "Anon", None);

    app.feed
        .assemble(FeedRequest::default())
        .await
        .expect("warm pool");

    app.engagement
        .set(alice, quote_id, EngagementKind::Like, true)
        .await
        .expect("like quote");

    // Counts stay stale until the pool entry ages out; only the overlay moved.
    let envelope = app
        .feed
        .assemble(FeedRequest::default())
        .await
        .expect("reassemble");
    assert_eq!(envelope.quotes[0].likes_count, 0);
    assert_eq!(app.store.system_list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn expired_pool_entries_are_rebuilt() {
    let app = build_app(CacheConfig {
        pool_ttl_seconds: 0,
        ..Default::default()
    });
    app.store.add_system_quote("short lived", "Anon", None);

    app.feed
        .assemble(FeedRequest::default())
        .await
        .expect("first assemble");
    app.feed
        .assemble(FeedRequest::default())
        .await
        .expect("second assemble");

    assert_eq!(app.store.system_list_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn expired_overlay_entries_are_rebuilt() {
    let app = build_app(CacheConfig {
        overlay_ttl_seconds: 1,
        ..Default::default()
    });
    let alice = app.store.add_user("Alice");
    app.store.add_system_quote("q", "Anon", None);

    let as_alice = FeedRequest {
        viewer: Some(alice),
        ..Default::default()
    };
    app.feed
        .assemble(as_alice.clone())
        .await
        .expect("first assemble");
    assert_eq!(app.store.liked_ids_calls.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    app.feed
        .assemble(as_alice)
        .await
        .expect("second assemble");
    assert_eq!(app.store.liked_ids_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn aggregation_failure_fails_the_rebuild_and_caches_nothing() {
    let app = default_app();
    app.store.add_system_quote("q", "Anon", None);
    app.store.fail_like_counts.store(true, Ordering::SeqCst);

    let result = app.feed.assemble(FeedRequest::default()).await;
    assert!(result.is_err());
    assert!(app.cache.get_pool(&FilterKey::all()).is_none());

    // Recovery: the next read rebuilds from scratch and succeeds.
    app.store.fail_like_counts.store(false, Ordering::SeqCst);
    let envelope = app
        .feed
        .assemble(FeedRequest::default())
        .await
        .expect("assemble after recovery");
    assert_eq!(envelope.quotes.len(), 1);
}

#[tokio::test]
async fn disabled_cache_goes_to_the_store_every_time() {
    let app = build_app(CacheConfig {
        enabled: false,
        ..Default::default()
    });
    app.store.add_system_quote("uncached", "Anon", None);

    for _ in 0..3 {
        app.feed
            .assemble(FeedRequest::default())
            .await
            .expect("assemble");
    }

    assert_eq!(app.store.system_list_calls.load(Ordering::SeqCst), 3);
}
