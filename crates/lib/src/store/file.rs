//! JSON file config store
//!
//! The admin credentials live in a small JSON object:
//!
//! ```json
//! { "username": "$argon2id$...", "password": "$argon2id$..." }
//! ```
//!
//! The file is read again on every lookup, so credential changes apply to the next
//! request without a restart. A missing file is [`StoreError::ConfigMissing`], never
//! open access; passwordless mode needs both fields written out as empty strings.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{ConfigStore, StoreError};
use crate::{Result, user::AdminCredentials};

/// A [`ConfigStore`] backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileConfig {
    path: PathBuf,
}

impl FileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the file with new credentials.
    pub async fn save(&self, credentials: &AdminCredentials) -> Result<()> {
        let json = serde_json::to_string_pretty(credentials)
            .map_err(|source| StoreError::SerializationFailed { source })?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| StoreError::FileIo {
                path: self.path.clone(),
                source,
            })?;
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for FileConfig {
    async fn get(&self) -> Result<AdminCredentials> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "admin config file not found");
                return Err(StoreError::ConfigMissing {
                    path: self.path.clone(),
                }
                .into());
            }
            Err(source) => {
                return Err(StoreError::FileIo {
                    path: self.path.clone(),
                    source,
                }
                .into());
            }
        };
        let credentials =
            serde_json::from_str(&contents).map_err(|source| StoreError::DeserializationFailed {
                path: self.path.clone(),
                source,
            })?;
        Ok(credentials)
    }
}
