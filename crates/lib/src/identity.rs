//! Caller identity
//!
//! Every request resolves to exactly one [`Identity`]: an anonymous guest, the single
//! administrator, or a registered user backed by a record in the user store.
//!
//! The administrator has no user record. Persisted session state writes it as
//! [`ADMIN_SENTINEL`]; in code it is always its own variant.

use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::constants::ADMIN_SENTINEL;

/// Primary key of a registered user. Always strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(NonZeroU64);

impl UserId {
    /// Create a user id, returning `None` for the reserved value 0.
    pub fn new(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(Self)
    }

    /// The raw numeric id.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl From<NonZeroU64> for UserId {
    fn from(id: NonZeroU64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who is making the current request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Not logged in.
    #[default]
    Guest,
    /// The administrator. Has no user record.
    Admin,
    /// A registered user.
    User(UserId),
}

impl Identity {
    /// Rebuild an identity from the persisted `(login, user_id)` pair.
    ///
    /// `user_id` is ignored unless `login` is set.
    pub fn from_stored(login: bool, user_id: u64) -> Self {
        if !login {
            return Identity::Guest;
        }
        match UserId::new(user_id) {
            Some(id) => Identity::User(id),
            None => Identity::Admin,
        }
    }

    /// The `user_id` to persist, or `None` for a guest.
    pub fn to_stored(self) -> Option<u64> {
        match self {
            Identity::Guest => None,
            Identity::Admin => Some(ADMIN_SENTINEL),
            Identity::User(id) => Some(id.get()),
        }
    }

    pub fn is_guest(self) -> bool {
        matches!(self, Identity::Guest)
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Identity::Admin)
    }

    /// True for the admin and for registered users.
    pub fn is_authenticated(self) -> bool {
        !self.is_guest()
    }

    /// The user id, if this identity is backed by a user record.
    pub fn user_id(self) -> Option<UserId> {
        match self {
            Identity::User(id) => Some(id),
            _ => None,
        }
    }

    /// Whether this identity may act as the user with numeric id `target`.
    ///
    /// The admin satisfies every target. Guests satisfy none.
    pub fn satisfies(self, target: u64) -> bool {
        match self {
            Identity::Guest => false,
            Identity::Admin => true,
            Identity::User(id) => id.get() == target,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Guest => write!(f, "guest"),
            Identity::Admin => write!(f, "admin"),
            Identity::User(id) => write!(f, "user:{id}"),
        }
    }
}
