//! Typed view over a session's persisted fields

use std::sync::Arc;

use serde_json::Value;

use super::{SessionStore, VisibleAlbums};
use crate::{
    Result,
    authority::SessionError,
    constants::{LEGACY_USER_ID, LOGIN, USER_ID, VISIBLE_ALBUMS},
    identity::Identity,
};

/// Reads and writes `login`, `user_id` and `visible_albums` on one session.
#[derive(Clone)]
pub struct SessionState {
    store: Arc<dyn SessionStore>,
}

impl SessionState {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Whether the `login` flag is the boolean `true`. Anything else, including a
    /// missing key, counts as logged out.
    pub async fn login(&self) -> Result<bool> {
        Ok(matches!(self.store.get(LOGIN).await?, Some(Value::Bool(true))))
    }

    /// The identity recorded in this session.
    ///
    /// Sessions written by earlier releases keep the id under [`LEGACY_USER_ID`];
    /// that key is consulted when `user_id` is absent. A logged in session whose id
    /// is missing or not a non-negative integer is reported as
    /// [`SessionError::CorruptSession`].
    pub async fn identity(&self) -> Result<Identity> {
        if !self.login().await? {
            return Ok(Identity::Guest);
        }
        let raw = match self.store.get(USER_ID).await? {
            Some(value) => Some(value),
            None => self.store.get(LEGACY_USER_ID).await?,
        };
        let user_id = raw.as_ref().and_then(Value::as_u64).ok_or_else(|| {
            let reason = match &raw {
                None => "missing while logged in".to_string(),
                Some(other) => format!("expected a non-negative integer, found {other}"),
            };
            SessionError::CorruptSession {
                key: USER_ID.to_string(),
                reason,
            }
        })?;
        Ok(Identity::from_stored(true, user_id))
    }

    /// Record `identity` as the session's caller. `Guest` clears `login` and `user_id`.
    pub async fn set_identity(&self, identity: Identity) -> Result<()> {
        match identity.to_stored() {
            Some(user_id) => {
                // user_id before login, so a failed write never pairs login with a stale id
                self.store.insert(USER_ID, Value::from(user_id)).await?;
                self.store.remove(LEGACY_USER_ID).await?;
                self.store.insert(LOGIN, Value::Bool(true)).await?;
            }
            None => {
                self.store.remove(LOGIN).await?;
                self.store.remove(USER_ID).await?;
                self.store.remove(LEGACY_USER_ID).await?;
            }
        }
        tracing::debug!(%identity, "session identity set");
        Ok(())
    }

    /// The visibility allowlist. Empty when never granted.
    pub async fn visible_albums(&self) -> Result<VisibleAlbums> {
        match self.store.get(VISIBLE_ALBUMS).await? {
            None => Ok(VisibleAlbums::new()),
            Some(value) => VisibleAlbums::from_value(value).map_err(|reason| {
                SessionError::CorruptSession {
                    key: VISIBLE_ALBUMS.to_string(),
                    reason,
                }
                .into()
            }),
        }
    }

    /// Replace the whole visibility allowlist.
    pub async fn set_visible_albums(&self, albums: &VisibleAlbums) -> Result<()> {
        self.store.insert(VISIBLE_ALBUMS, albums.to_value()).await
    }

    /// Erase every key of the session, not only the ones this type knows about.
    pub async fn flush(&self) -> Result<()> {
        self.store.flush().await
    }
}
