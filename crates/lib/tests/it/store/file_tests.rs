//! JSON-backed users and admin configuration

use shutter::{
    AdminCredentials, Collaborators, ConfigStore, UserStore,
    session::InMemorySession,
    store::{FileConfig, InMemoryUsers},
};
use std::sync::Arc;

use crate::helpers::*;

#[tokio::test]
async fn test_users_file_drives_login() {
    let dir = tempfile::tempdir().unwrap();
    let users_path = dir.path().join("users.json");

    let users = InMemoryUsers::new();
    users
        .insert(hashed_user(3, "carol", "carol-pw", true))
        .await
        .unwrap();
    users.save_to_file(&users_path).await.unwrap();

    let loaded = Arc::new(InMemoryUsers::load_from_file(&users_path).await.unwrap());
    let found = loaded.find_by_username("carol").await.unwrap().unwrap();
    assert_eq!(found.id, uid(3));
    assert!(found.upload);

    let config = Arc::new(FileConfig::new(dir.path().join("admin.json")));
    let mut authority =
        Collaborators::new(loaded, config).authority(Arc::new(InMemorySession::new()));
    assert!(
        authority
            .authenticate_user("carol", "carol-pw", "203.0.113.5")
            .await
            .unwrap()
    );
    assert!(authority.can_upload().await.unwrap());
}

#[tokio::test]
async fn test_config_file_changes_apply_to_next_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let config = Arc::new(FileConfig::new(dir.path().join("admin.json")));
    let collaborators = Collaborators::new(Arc::new(InMemoryUsers::new()), config.clone());

    config.save(&AdminCredentials::default()).await.unwrap();
    let mut first = collaborators.authority(Arc::new(InMemorySession::new()));
    assert!(first.try_passwordless_login().await.unwrap());

    config.save(&hashed_admin()).await.unwrap();
    assert!(!config.get().await.unwrap().is_unset());

    let mut second = collaborators.authority(Arc::new(InMemorySession::new()));
    assert!(!second.try_passwordless_login().await.unwrap());
    assert!(
        second
            .authenticate_admin(ADMIN_USERNAME, ADMIN_PASSWORD, "203.0.113.5")
            .await
            .unwrap()
    );

    config.save(&AdminCredentials::default()).await.unwrap();
    let mut third = collaborators.authority(Arc::new(InMemorySession::new()));
    assert!(third.try_passwordless_login().await.unwrap());
}

#[tokio::test]
async fn test_absent_config_never_opens_access() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("admin.json");
    let config = Arc::new(FileConfig::new(&path));
    let collaborators = Collaborators::new(Arc::new(InMemoryUsers::new()), config);

    // mistyped or deleted config file
    let session = Arc::new(InMemorySession::new());
    let mut authority = collaborators.authority(session.clone());
    let err = authority.try_passwordless_login().await.unwrap_err();
    assert!(err.is_store_error());
    assert!(!authority.is_logged_in().await.unwrap());
    assert!(session.is_empty().await);

    // present but without the fields
    for contents in ["{}", r#"{"username": ""}"#, r#"{"password": ""}"#] {
        std::fs::write(&path, contents).unwrap();
        assert!(authority.try_passwordless_login().await.is_err());
        assert!(!authority.is_admin().await.unwrap());
    }

    // both fields present and empty is the only open access
    std::fs::write(&path, r#"{"username": "", "password": ""}"#).unwrap();
    assert!(authority.try_passwordless_login().await.unwrap());
    assert!(authority.is_admin().await.unwrap());
}

#[tokio::test]
async fn test_malformed_users_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = InMemoryUsers::load_from_file(&path).await.unwrap_err();
    assert!(err.is_store_error());
}

#[tokio::test]
async fn test_duplicate_usernames_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    let users = vec![
        hashed_user(1, "dave", "a", false),
        hashed_user(2, "dave", "b", false),
    ];
    std::fs::write(&path, serde_json::to_string(&users).unwrap()).unwrap();

    let err = InMemoryUsers::load_from_file(&path).await.unwrap_err();
    assert!(err.is_store_error());
}
