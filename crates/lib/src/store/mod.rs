//! Stores the session authority reads from
//!
//! The authority never owns user records or the admin configuration; it looks them up
//! through the [`UserStore`] and [`ConfigStore`] traits. A missing record is `Ok(None)`.
//! Errors are reserved for the store itself failing, and are passed through the
//! authority unmodified.
//!
//! Reference implementations:
//! - [`InMemoryUsers`] and [`StaticConfig`], held entirely in memory
//! - [`FileConfig`], re-reading a JSON file on every lookup

use async_trait::async_trait;

use crate::{
    Result,
    identity::UserId,
    user::{AdminCredentials, User},
};

mod errors;
pub use errors::StoreError;

mod file;
pub use file::FileConfig;

mod memory;
pub use memory::{InMemoryUsers, StaticConfig};

/// Lookup of user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}

/// Source of the current admin credential configuration.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Fetch the current admin credentials. Unset fields are empty strings.
    async fn get(&self) -> Result<AdminCredentials>;
}
