//! Session and identity error types.
//!
//! Failed logins are not errors: the authenticate operations answer `Ok(false)`.
//! These variants cover queries made on behalf of a caller who is not who the
//! query needs them to be, and sessions whose stored state cannot be trusted.

use thiserror::Error;

use crate::identity::UserId;

/// Errors raised by identity and authorization queries.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SessionError {
    /// The operation requires a logged in caller.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// A user record was requested for the admin, which has none.
    ///
    /// Callers must check `is_admin()` before asking for the current user.
    #[error("The admin identity has no user record")]
    AdminHasNoUserRecord,

    /// The session refers to a user that is no longer in the user store.
    #[error("User not found: {id}")]
    UserNotFound {
        /// The id stored in the session
        id: UserId,
    },

    /// A stored session value has the wrong shape.
    #[error("Corrupt session value under '{key}': {reason}")]
    CorruptSession {
        /// The session key holding the bad value
        key: String,
        /// What was wrong with it
        reason: String,
    },
}

impl SessionError {
    /// Check if this error means the caller must log in first.
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, SessionError::NotAuthenticated)
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SessionError::UserNotFound { .. })
    }

    /// Check if this error is a caller breaking the authority's contract.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, SessionError::AdminHasNoUserRecord)
    }

    /// Check if this error indicates session data that cannot be trusted.
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            SessionError::UserNotFound { .. } | SessionError::CorruptSession { .. }
        )
    }

    /// Get the user id if this error is about a missing user.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            SessionError::UserNotFound { id } => Some(*id),
            _ => None,
        }
    }
}

impl From<SessionError> for crate::Error {
    fn from(err: SessionError) -> Self {
        crate::Error::Session(err)
    }
}
