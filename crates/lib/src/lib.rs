//!
//! Shutter: the session authority of a two-tier media gallery.
//! This library decides, for every request, who the caller is and what they may do.
//!
//! ## Core Concepts
//!
//! * **Identity (`identity::Identity`)**: Every request is a `Guest`, the single `Admin`, or a
//!   registered `User`. The admin has no user record; it is never looked up in the user store.
//! * **Session state (`session::SessionState`)**: Three persisted fields per client session:
//!   `login`, `user_id` (0 is the admin sentinel) and the `visible_albums` allowlist.
//! * **Session stores (`session::SessionStore`)**: A pluggable key-value layer scoped to one
//!   client session. `session::SessionRegistry` is the in-memory reference implementation.
//! * **Collaborator stores (`store::UserStore`, `store::ConfigStore`)**: Where user records and
//!   the admin credential hashes live.
//! * **Credentials (`user::CredentialVerifier`)**: One-way `verify(plaintext, hash)`, Argon2id by
//!   default.
//! * **SessionAuthority (`authority::SessionAuthority`)**: One per request. Answers identity
//!   and authorization queries, performs logins and logouts, and manages visibility grants.

pub mod audit;
pub mod authority;
pub mod constants;
pub mod identity;
pub mod session;
pub mod store;
pub mod user;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use audit::{AuditLog, TracingAudit};
pub use authority::{Collaborators, SessionAuthority, SessionError};
pub use identity::{Identity, UserId};
pub use session::{SessionRegistry, SessionState, SessionStore, VisibleAlbums};
pub use store::{ConfigStore, StoreError, UserStore};
pub use user::{AdminCredentials, Argon2Verifier, CredentialError, CredentialVerifier, User};

/// Result type used throughout the Shutter library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Shutter library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured session and identity errors from the authority module
    #[error(transparent)]
    Session(authority::SessionError),

    /// Structured errors from the user, config and session stores
    #[error(transparent)]
    Store(store::StoreError),

    /// Structured credential hashing errors from the user module
    #[error(transparent)]
    Credential(user::CredentialError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Session(_) => "authority",
            Error::Store(_) => "store",
            Error::Credential(_) => "user",
        }
    }

    /// Check if this error means the caller must log in first.
    pub fn is_not_authenticated(&self) -> bool {
        match self {
            Error::Session(session_err) => session_err.is_not_authenticated(),
            _ => false,
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Session(session_err) => session_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is a caller breaking the authority's contract,
    /// such as asking for the admin's user record.
    pub fn is_contract_violation(&self) -> bool {
        match self {
            Error::Session(session_err) => session_err.is_contract_violation(),
            _ => false,
        }
    }

    /// Check if this error indicates a data integrity issue.
    pub fn is_integrity_error(&self) -> bool {
        match self {
            Error::Session(session_err) => session_err.is_integrity_error(),
            _ => false,
        }
    }

    /// Check if this error came from an external store.
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_io_error(),
            _ => false,
        }
    }
}
