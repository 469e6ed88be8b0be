//! In-memory user and config stores
//!
//! Suitable for tests, development and small single-process deployments. The user
//! store can be saved to and loaded from a JSON file holding an array of users.

use std::{
    collections::{BTreeMap, HashMap},
    num::NonZeroU64,
    path::Path,
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ConfigStore, StoreError, UserStore};
use crate::{
    Result,
    identity::UserId,
    user::{AdminCredentials, User},
};

/// A user store backed by a map, with a username index.
#[derive(Debug, Default)]
pub struct InMemoryUsers {
    inner: RwLock<UsersInner>,
}

#[derive(Debug, Default)]
struct UsersInner {
    by_id: BTreeMap<UserId, User>,
    by_username: HashMap<String, UserId>,
}

impl InMemoryUsers {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user. Both the id and the username must be unused.
    pub async fn insert(&self, user: User) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.by_id.contains_key(&user.id) {
            return Err(StoreError::DuplicateUserId { id: user.id }.into());
        }
        if inner.by_username.contains_key(&user.username) {
            return Err(StoreError::DuplicateUsername {
                username: user.username,
            }
            .into());
        }
        inner.by_username.insert(user.username.clone(), user.id);
        inner.by_id.insert(user.id, user);
        Ok(())
    }

    /// Remove a user, returning the removed record.
    pub async fn remove(&self, id: UserId) -> Option<User> {
        let mut inner = self.inner.write().await;
        let user = inner.by_id.remove(&id)?;
        inner.by_username.remove(&user.username);
        Some(user)
    }

    /// The smallest id greater than every id in use.
    pub async fn next_id(&self) -> UserId {
        let inner = self.inner.read().await;
        let last = inner.by_id.keys().next_back().map_or(0, |id| id.get());
        UserId::from(NonZeroU64::MIN.saturating_add(last))
    }

    /// All users, ordered by id.
    pub async fn list(&self) -> Vec<User> {
        self.inner.read().await.by_id.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.by_id.is_empty()
    }

    /// Load users from a JSON array. A missing file yields an empty store.
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let store = Self::new();
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(store),
            Err(source) => {
                return Err(StoreError::FileIo {
                    path: path.to_path_buf(),
                    source,
                }
                .into());
            }
        };
        let users: Vec<User> =
            serde_json::from_str(&contents).map_err(|source| StoreError::DeserializationFailed {
                path: path.to_path_buf(),
                source,
            })?;
        for user in users {
            store.insert(user).await?;
        }
        let count = store.len().await;
        tracing::debug!(path = %path.display(), users = count, "loaded user store");
        Ok(store)
    }

    /// Save all users as a JSON array.
    pub async fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let users = self.list().await;
        let json = serde_json::to_string_pretty(&users)
            .map_err(|source| StoreError::SerializationFailed { source })?;
        tokio::fs::write(path, json)
            .await
            .map_err(|source| StoreError::FileIo {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUsers {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.inner.read().await.by_id.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_username
            .get(username)
            .and_then(|id| inner.by_id.get(id))
            .cloned())
    }
}

/// A config store holding one replaceable set of admin credentials.
#[derive(Debug, Default)]
pub struct StaticConfig {
    credentials: RwLock<AdminCredentials>,
}

impl StaticConfig {
    pub fn new(credentials: AdminCredentials) -> Self {
        Self {
            credentials: RwLock::new(credentials),
        }
    }

    /// A config with no admin credentials, i.e. open access.
    pub fn unset() -> Self {
        Self::default()
    }

    /// Replace the configured credentials.
    pub async fn set(&self, credentials: AdminCredentials) {
        *self.credentials.write().await = credentials;
    }
}

#[async_trait]
impl ConfigStore for StaticConfig {
    async fn get(&self) -> Result<AdminCredentials> {
        Ok(self.credentials.read().await.clone())
    }
}
