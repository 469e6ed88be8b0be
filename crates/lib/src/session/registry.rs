//! Session registry
//!
//! Maps opaque session identifiers to [`InMemorySession`]s. Identifiers are random UUIDs;
//! handing them to clients (cookies and the like) is the transport layer's business.
//!
//! The whole registry can be saved to and loaded from a JSON file, which is how the
//! command line tool keeps sessions between invocations.

use std::{collections::HashMap, path::Path, sync::Arc};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::InMemorySession;
use crate::{Result, store::StoreError};

/// Opaque session identifier.
pub type SessionId = String;

/// The current persistence file format version.
/// v0 indicates this is an unstable format subject to breaking changes.
const PERSISTENCE_VERSION: u8 = 0;

/// Helper to check if version is default (0) for serde skip_serializing_if
fn is_v0(v: &u8) -> bool {
    *v == 0
}

/// Validates the persistence version during deserialization.
fn validate_persistence_version<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != PERSISTENCE_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported persistence version {version}; only version {PERSISTENCE_VERSION} is supported"
        )));
    }
    Ok(version)
}

/// Serializable form of the registry
#[derive(Serialize, Deserialize)]
struct SerializableRegistry {
    /// File format version for compatibility checking
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_persistence_version"
    )]
    version: u8,
    #[serde(default)]
    sessions: HashMap<SessionId, HashMap<String, Value>>,
}

/// In-memory session registry
///
/// Cloning is cheap and every clone sees the same sessions.
#[derive(Clone, Debug, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, Arc<InMemorySession>>>>,
}

impl SessionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new, empty session under a fresh random identifier.
    pub async fn create(&self) -> (SessionId, Arc<InMemorySession>) {
        let id = Uuid::new_v4().to_string();
        let session = Arc::new(InMemorySession::new());
        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::clone(&session));
        tracing::debug!(session = %id, "created session");
        (id, session)
    }

    /// Look up an existing session.
    pub async fn get(&self, id: &str) -> Option<Arc<InMemorySession>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Look up a session, starting an empty one under `id` if it does not exist.
    pub async fn open(&self, id: &str) -> Arc<InMemorySession> {
        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(InMemorySession::new())),
        )
    }

    /// Remove a session entirely. Returns whether it existed.
    pub async fn destroy(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Number of sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Save every session to a JSON file.
    pub async fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let handles: Vec<(SessionId, Arc<InMemorySession>)> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(id, session)| (id.clone(), Arc::clone(session)))
            .collect();

        let mut sessions = HashMap::with_capacity(handles.len());
        for (id, session) in handles {
            sessions.insert(id, session.snapshot().await);
        }

        let serializable = SerializableRegistry {
            version: PERSISTENCE_VERSION,
            sessions,
        };
        let json = serde_json::to_string_pretty(&serializable)
            .map_err(|source| StoreError::SerializationFailed { source })?;
        tokio::fs::write(path, json)
            .await
            .map_err(|source| StoreError::FileIo {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(())
    }

    /// Load a registry from a JSON file. A missing file yields an empty registry.
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(source) => {
                return Err(StoreError::FileIo {
                    path: path.to_path_buf(),
                    source,
                }
                .into());
            }
        };
        let serializable: SerializableRegistry =
            serde_json::from_str(&contents).map_err(|source| StoreError::DeserializationFailed {
                path: path.to_path_buf(),
                source,
            })?;

        let sessions = serializable
            .sessions
            .into_iter()
            .map(|(id, values)| (id, Arc::new(InMemorySession::from_values(values))))
            .collect();
        Ok(Self {
            sessions: Arc::new(RwLock::new(sessions)),
        })
    }
}
