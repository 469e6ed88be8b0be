//! Per-client session storage
//!
//! A [`SessionStore`] is a key-value map already scoped to one client session; the
//! transport layer picks the right one from an opaque session identifier before the
//! authority ever sees it. Values are `serde_json::Value`s so that any durable engine
//! can sit behind the trait.
//!
//! [`SessionState`] is the typed view the authority works through. It knows the three
//! persisted fields (see [`crate::constants`]) and how to read and write them.
//!
//! [`InMemorySession`] and [`SessionRegistry`] are the in-memory reference engine.
//!
//! ## Concurrency
//!
//! Two requests on the same session are not coordinated. Every write is last-write-wins,
//! and [`SessionState::set_visible_albums`] writes the whole allowlist, so two
//! concurrent grants of different albums can lose one of them.

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

mod albums;
pub use albums::VisibleAlbums;

mod in_memory;
pub use in_memory::InMemorySession;

mod registry;
pub use registry::{SessionId, SessionRegistry};

mod state;
pub use state::SessionState;

/// Key-value storage for one client session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a value.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Write a value, replacing any previous one.
    async fn insert(&self, key: &str, value: Value) -> Result<()>;

    /// Delete a value, returning what was there.
    async fn remove(&self, key: &str) -> Result<Option<Value>>;

    /// Whether a value is present under `key`.
    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Delete every key of this session.
    async fn flush(&self) -> Result<()>;
}
