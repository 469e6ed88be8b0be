//! Album visibility grants across requests and sessions

use serde_json::json;
use shutter::{SessionStore, constants::VISIBLE_ALBUMS};

use crate::helpers::*;

#[tokio::test]
async fn test_grant_persists_for_the_session() {
    let ctx = TestContext::new().await;
    let session = ctx.new_session().await;

    // a guest unlocks a protected album
    ctx.request(&session)
        .await
        .grant_visible_album("12")
        .await
        .unwrap();

    let next = ctx.request(&session).await;
    assert!(next.has_visible_album("12").await.unwrap());
    assert!(!next.has_visible_album("120").await.unwrap());
    assert!(!next.has_visible_album("1").await.unwrap());
}

#[tokio::test]
async fn test_grants_do_not_leak_between_sessions() {
    let ctx = TestContext::new().await;
    let first = ctx.new_session().await;
    let second = ctx.new_session().await;

    ctx.request(&first)
        .await
        .grant_visible_album("12")
        .await
        .unwrap();
    assert!(
        !ctx.request(&second)
            .await
            .has_visible_album("12")
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_grants_accumulate_without_duplicates() {
    let ctx = TestContext::new().await;
    let session = ctx.new_session().await;

    for album in ["4", "2", "4", "9", "2"] {
        ctx.request(&session)
            .await
            .grant_visible_album(album)
            .await
            .unwrap();
    }

    let albums = ctx.request(&session).await.visible_albums().await.unwrap();
    assert_eq!(albums.iter().collect::<Vec<_>>(), vec!["2", "4", "9"]);

    let stored = ctx.registry().get(&session).await.unwrap();
    assert_eq!(
        stored.get(VISIBLE_ALBUMS).await.unwrap(),
        Some(json!(["2", "4", "9"]))
    );
}

#[tokio::test]
async fn test_grants_survive_login_but_not_logout() {
    let ctx = TestContext::new()
        .await
        .with_user(hashed_user(7, "alice", "correct-pw", true))
        .await;
    let session = ctx.new_session().await;

    ctx.request(&session)
        .await
        .grant_visible_album("5")
        .await
        .unwrap();

    let mut login = ctx.request(&session).await;
    login
        .authenticate_user("alice", "correct-pw", "192.0.2.10")
        .await
        .unwrap();
    assert!(login.has_visible_album("5").await.unwrap());

    login.logout().await.unwrap();
    assert!(
        !ctx.request(&session)
            .await
            .has_visible_album("5")
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_legacy_session_value() {
    let ctx = TestContext::new().await;
    let session = ctx.new_session().await;
    ctx.registry()
        .open(&session)
        .await
        .insert(VISIBLE_ALBUMS, json!("12|15"))
        .await
        .unwrap();

    let authority = ctx.request(&session).await;
    assert!(authority.has_visible_album("15").await.unwrap());
    assert!(!authority.has_visible_album("12|15").await.unwrap());
}

#[tokio::test]
async fn test_corrupt_allowlist_is_reported() {
    let ctx = TestContext::new().await;
    let session = ctx.new_session().await;
    ctx.registry()
        .open(&session)
        .await
        .insert(VISIBLE_ALBUMS, json!({"12": true}))
        .await
        .unwrap();

    let err = ctx
        .request(&session)
        .await
        .has_visible_album("12")
        .await
        .unwrap_err();
    assert!(err.is_integrity_error());
}
