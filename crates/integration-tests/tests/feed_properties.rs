//! The same feed properties, checked against the demo store and the document store.

use std::collections::BTreeSet;

use bytes::Bytes;
use gf_core::{FeedError, MediaFile, FEED_PAGE_SIZE};
use integration_tests::Harness;

fn as_set(likes: &[String]) -> BTreeSet<&str> {
    likes.iter().map(String::as_str).collect()
}

async fn like_scenario_on_fixture(h: Harness) {
    let before = h.all_posts().await;
    h.sign_in("user-5", "PixelQueen");

    h.feed.like_post("post-1").await.unwrap();
    let once = h.post("post-1").await;
    assert_eq!(
        as_set(&once.likes),
        BTreeSet::from(["user-2", "user-3", "user-4", "user-5"])
    );

    h.feed.like_post("post-1").await.unwrap();
    let twice = h.post("post-1").await;
    assert_eq!(twice.likes, once.likes);

    for old in before.iter().filter(|p| p.id != "post-1") {
        assert_eq!(h.post(&old.id).await.likes, old.likes, "{} changed", old.id);
    }
}

async fn unlike_restores_likes(h: Harness) {
    let before = h.post("post-3").await.likes;
    h.sign_in("user-9", "FragMaster");

    h.feed.like_post("post-3").await.unwrap();
    assert!(h.post("post-3").await.is_liked_by("user-9"));

    h.feed.unlike_post("post-3").await.unwrap();
    h.feed.unlike_post("post-3").await.unwrap();
    assert_eq!(h.post("post-3").await.likes, before);
}

async fn comments_only_grow_at_the_end(h: Harness) {
    let before = h.post("post-2").await.comments;
    h.sign_in("user-3", "SakuraPro");

    h.feed.add_comment("post-2", "gg").await.unwrap();
    h.feed.add_comment("post-2", "rematch?").await.unwrap();

    let after = h.post("post-2").await.comments;
    assert_eq!(after.len(), before.len() + 2);
    assert_eq!(&after[..before.len()], &before[..]);

    let added = &after[before.len()];
    assert_eq!(added.content, "gg");
    assert_eq!(added.author_id, "user-3");
    assert!(added.likes.is_empty());
    assert_eq!(after.last().unwrap().content, "rematch?");
}

async fn author_snapshot_survives_renames(h: Harness) {
    let original = h.sign_in("user-7", "OldTag");
    let id = h.feed.create_post("new main: Jett", Vec::new()).await.unwrap();

    h.sign_in("user-7", "NewTag");
    h.feed.add_comment(&id, "renamed!").await.unwrap();

    let post = h.post(&id).await;
    assert_eq!(post.author_id, original.id);
    assert_eq!(post.author_name, "OldTag");
    assert_eq!(post.author_image, original.profile_image);
    assert!(post.likes.is_empty());
    assert_eq!(post.comments[0].author_name, "NewTag");
    assert_eq!(h.feed.list_posts().await.unwrap()[0].id, id);
}

async fn anonymous_calls_change_nothing(h: Harness) {
    let before = h.all_posts().await;

    let outcomes = [
        h.feed.create_post("ghost", vec![MediaFile::new(Bytes::from_static(b"x"))]).await.map(|_| ()),
        h.feed.like_post("post-1").await,
        h.feed.unlike_post("post-1").await,
        h.feed.add_comment("post-1", "boo").await,
    ];
    for outcome in outcomes {
        assert!(matches!(outcome, Err(FeedError::AuthenticationRequired(_))));
    }

    assert_eq!(h.all_posts().await, before);
    assert!(h.notices.messages().is_empty());
}

async fn feed_is_capped_and_newest_first(h: Harness) {
    h.sign_in("user-1", "Manos550");
    for n in 0..8 {
        h.feed.create_post(&format!("scrim recap #{n}"), Vec::new()).await.unwrap();
    }

    let page = h.feed.list_posts().await.unwrap();
    assert_eq!(page.len(), FEED_PAGE_SIZE);
    assert!(page.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let ids: BTreeSet<&str> = page.iter().map(|p| p.id.as_str()).collect();
    assert!(ids.contains("post-1") && ids.contains("post-2"));
    assert!(!ids.contains("post-3") && !ids.contains("post-5"));
}

async fn media_urls_follow_upload_order(h: Harness) {
    h.sign_in("user-4", "ArcticWolf");
    let media = ["first", "second", "third"]
        .map(|s| MediaFile::new(Bytes::from(s)).with_content_type("image/png"))
        .to_vec();

    let id = h.feed.create_post("aim training", media).await.unwrap();

    let post = h.post(&id).await;
    let stored: Vec<Vec<u8>> = post
        .media
        .iter()
        .map(|url| h.read_media(url).expect("media is retrievable"))
        .collect();
    assert_eq!(stored, [b"first".to_vec(), b"second".to_vec(), b"third".to_vec()]);
    assert_eq!(h.notices.messages(), ["Post created successfully"]);
}

async fn missing_posts_are_reported_consistently(h: Harness) {
    h.sign_in("user-2", "NightStalker");

    assert!(h.feed.like_post("post-404").await.unwrap_err().is_not_found());
    assert!(h.feed.unlike_post("post-404").await.unwrap_err().is_not_found());
    assert!(h.feed.add_comment("post-404", "hello?").await.unwrap_err().is_not_found());

    assert_eq!(
        h.notices.messages(),
        ["Failed to like post", "Failed to unlike post", "Failed to add comment"]
    );
}

async fn mutations_touch_updated_at(h: Harness) {
    let before = h.post("post-4").await;
    h.sign_in("user-1", "Manos550");

    // user-1 already likes post-4; the call is accepted and still stamps the post
    h.feed.like_post("post-4").await.unwrap();

    let after = h.post("post-4").await;
    assert_eq!(after.likes, before.likes);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
}

macro_rules! on_both_backends {
    ($($property:ident),* $(,)?) => {
        mod demo {
            $(
                #[tokio::test]
                async fn $property() {
                    super::$property(integration_tests::Harness::demo()).await
                }
            )*
        }

        mod live {
            $(
                #[tokio::test]
                async fn $property() {
                    super::$property(integration_tests::Harness::live()).await
                }
            )*
        }
    };
}

on_both_backends!(
    like_scenario_on_fixture,
    unlike_restores_likes,
    comments_only_grow_at_the_end,
    author_snapshot_survives_renames,
    anonymous_calls_change_nothing,
    feed_is_capped_and_newest_first,
    media_urls_follow_upload_order,
    missing_posts_are_reported_consistently,
    mutations_touch_updated_at,
);
