//! In-memory session storage

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::SessionStore;
use crate::Result;

/// One session's values, held in a map behind a lock.
///
/// Usually obtained from a [`SessionRegistry`](super::SessionRegistry), which maps
/// session identifiers to these.
#[derive(Debug, Default)]
pub struct InMemorySession {
    values: RwLock<HashMap<String, Value>>,
}

impl InMemorySession {
    /// Creates a new, empty session.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_values(values: HashMap<String, Value>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }

    /// Copy of every stored value.
    pub async fn snapshot(&self) -> HashMap<String, Value> {
        self.values.read().await.clone()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySession {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn insert(&self, key: &str, value: Value) -> Result<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.write().await.remove(key))
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.values.read().await.contains_key(key))
    }

    async fn flush(&self) -> Result<()> {
        self.values.write().await.clear();
        Ok(())
    }
}
