//! Error types for the external stores.
//!
//! Covers the user store, the admin configuration store and session stores. These are
//! infrastructure failures; "no such record" is never an error at this layer.

use std::path::PathBuf;

use thiserror::Error;

use crate::identity::UserId;

/// Errors raised by user, config and session stores.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("Store unavailable: {reason}")]
    Unavailable {
        /// Description of the failure
        reason: String,
    },

    /// A second user with the same username was inserted.
    #[error("Username already exists: {username}")]
    DuplicateUsername {
        /// The conflicting username
        username: String,
    },

    /// A second user with the same primary key was inserted.
    #[error("User id already exists: {id}")]
    DuplicateUserId {
        /// The conflicting id
        id: UserId,
    },

    /// The admin configuration file does not exist.
    ///
    /// Absence is not the same as unset credentials: open access needs both fields
    /// present and empty.
    #[error("Admin configuration not found at {}", path.display())]
    ConfigMissing {
        /// The expected location of the file
        path: PathBuf,
    },

    /// File I/O error.
    #[error("File I/O error on {}", path.display())]
    FileIo {
        /// The file being read or written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Serialization failed.
    #[error("Serialization failed")]
    SerializationFailed {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization failed.
    #[error("Deserialization failed for {}", path.display())]
    DeserializationFailed {
        /// The file being parsed
        path: PathBuf,
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Check if this error indicates the store itself is unreachable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            StoreError::DuplicateUsername { .. } | StoreError::DuplicateUserId { .. }
        )
    }

    /// Check if this error means the admin configuration was never written.
    pub fn is_config_missing(&self) -> bool {
        matches!(self, StoreError::ConfigMissing { .. })
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, StoreError::FileIo { .. })
    }

    /// Check if this error is related to serialization
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            StoreError::SerializationFailed { .. } | StoreError::DeserializationFailed { .. }
        )
    }
}

impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
