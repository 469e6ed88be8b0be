//! Registry lifecycle and persistence

use serde_json::json;
use shutter::{
    Identity, SessionRegistry, SessionStore,
    constants::{LOGIN, USER_ID},
};

use crate::helpers::*;

#[tokio::test]
async fn test_registry_roundtrip_keeps_logins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.json");

    let ctx = TestContext::new()
        .await
        .with_user(hashed_user(7, "alice", "correct-pw", false))
        .await;
    let session = ctx.new_session().await;
    let mut authority = ctx.request(&session).await;
    authority
        .authenticate_user("alice", "correct-pw", "192.0.2.10")
        .await
        .unwrap();
    authority.grant_visible_album("3").await.unwrap();
    ctx.registry().save_to_file(&path).await.unwrap();

    let restored = SessionRegistry::load_from_file(&path).await.unwrap();
    assert_eq!(restored.len().await, 1);
    let stored = restored.get(&session).await.unwrap();
    assert_eq!(stored.get(LOGIN).await.unwrap(), Some(json!(true)));
    assert_eq!(stored.get(USER_ID).await.unwrap(), Some(json!(7)));

    let authority = ctx.collaborators().authority(stored);
    assert_eq!(authority.identity().await.unwrap(), Identity::User(uid(7)));
    assert!(authority.has_visible_album("3").await.unwrap());
}

#[tokio::test]
async fn test_missing_registry_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let registry = SessionRegistry::load_from_file(dir.path().join("absent.json"))
        .await
        .unwrap();
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn test_unknown_registry_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.json");
    std::fs::write(&path, r#"{"_v": 9, "sessions": {}}"#).unwrap();

    let err = SessionRegistry::load_from_file(&path).await.unwrap_err();
    assert!(err.is_store_error());
}

#[tokio::test]
async fn test_destroyed_session_reopens_empty() {
    let ctx = TestContext::new().await;
    let session = ctx.new_session().await;
    ctx.request(&session)
        .await
        .login_as(Identity::Admin)
        .await
        .unwrap();

    assert!(ctx.registry().destroy(&session).await);
    assert!(!ctx.registry().destroy(&session).await);
    assert!(ctx.registry().get(&session).await.is_none());

    let authority = ctx.request(&session).await;
    assert!(!authority.is_logged_in().await.unwrap());
}

#[tokio::test]
async fn test_session_ids_are_unique() {
    let registry = SessionRegistry::new();
    let (first, _) = registry.create().await;
    let (second, _) = registry.create().await;
    assert_ne!(first, second);
    assert_eq!(registry.len().await, 2);
}
