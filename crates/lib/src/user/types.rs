//! Core data types for the user system

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// A registered user as held by a [`UserStore`](crate::store::UserStore).
///
/// The administrator is never represented by one of these.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Primary key
    pub id: UserId,

    /// Unique login name
    pub username: String,

    /// Password hash (Argon2id PHC string with the default verifier)
    pub password_hash: String,

    /// Whether this user may upload media
    #[serde(default)]
    pub upload: bool,
}

impl User {
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        upload: bool,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash: password_hash.into(),
            upload,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("upload", &self.upload)
            .finish()
    }
}

/// Admin credential configuration, as returned by a [`ConfigStore`](crate::store::ConfigStore).
///
/// Both fields hold hashes. The admin *username* is hashed too, so it is
/// verified like a password rather than compared as a string.
///
/// The empty string means "unset". When both fields are unset the gallery runs
/// in open access mode and every session may log in as admin without credentials.
/// Both fields are required when deserializing; a missing field is not the empty string.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredentials {
    /// Hash of the admin username, or empty
    pub username: String,

    /// Hash of the admin password, or empty
    pub password: String,
}

impl AdminCredentials {
    pub fn new(username_hash: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username_hash.into(),
            password: password_hash.into(),
        }
    }

    /// True when no admin credentials are configured at all.
    pub fn is_unset(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |hash: &str| if hash.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("AdminCredentials")
            .field("username", &redact(&self.username))
            .field("password", &redact(&self.password))
            .finish()
    }
}
