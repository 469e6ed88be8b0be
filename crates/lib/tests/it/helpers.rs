use std::sync::Arc;

use shutter::{
    AdminCredentials, User, UserId,
    store::{InMemoryUsers, StaticConfig},
    user::hash_password,
};

// Re-export tokio test macro for convenience
pub use tokio;

// Re-export TestContext for convenience
pub use crate::context::TestContext;

pub const ADMIN_USERNAME: &str = "curator";
pub const ADMIN_PASSWORD: &str = "darkroom";

/// Shorthand for a known non-zero user id.
pub fn uid(id: u64) -> UserId {
    UserId::new(id).expect("user ids in tests are non-zero")
}

/// Build a user whose password is hashed with Argon2.
pub fn hashed_user(id: u64, username: &str, password: &str, upload: bool) -> User {
    let hash = hash_password(password).expect("Failed to hash test password");
    User::new(uid(id), username, hash, upload)
}

/// Admin credentials hashed with Argon2, both fields set.
pub fn hashed_admin() -> AdminCredentials {
    AdminCredentials::new(
        hash_password(ADMIN_USERNAME).expect("Failed to hash admin username"),
        hash_password(ADMIN_PASSWORD).expect("Failed to hash admin password"),
    )
}

/// A user store holding `users`.
pub async fn users_with(users: impl IntoIterator<Item = User>) -> Arc<InMemoryUsers> {
    let store = InMemoryUsers::new();
    for user in users {
        store.insert(user).await.expect("Failed to insert test user");
    }
    Arc::new(store)
}

/// Config with the standard hashed admin.
pub fn admin_config() -> Arc<StaticConfig> {
    Arc::new(StaticConfig::new(hashed_admin()))
}
