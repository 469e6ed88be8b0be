//! Test context for managing test setup and lifecycle.
//!
//! Provides a composable `TestContext` that explicitly shows what each test needs:
//! a session registry standing in for the web layer's cookie jar, plus the
//! collaborators every request's authority is built from.

use std::sync::Arc;

use shutter::{
    Collaborators, SessionAuthority, SessionRegistry, User,
    session::SessionId,
    store::{InMemoryUsers, StaticConfig},
    testing::RecordingAudit,
};

use crate::helpers::{admin_config, users_with};

/// Test context wiring stores, a registry and a recording audit log together.
///
/// Use the builder methods to set up what the test needs:
/// - `TestContext::new().await` - hashed admin, no users
/// - `.with_user(user)` - adds a registered user
/// - `.with_config(config)` - replaces the admin configuration
pub struct TestContext {
    users: Arc<InMemoryUsers>,
    config: Arc<StaticConfig>,
    audit: Arc<RecordingAudit>,
    registry: SessionRegistry,
}

impl TestContext {
    /// Create a new test context.
    pub async fn new() -> Self {
        Self {
            users: users_with([]).await,
            config: admin_config(),
            audit: Arc::new(RecordingAudit::new()),
            registry: SessionRegistry::new(),
        }
    }

    /// Add a registered user.
    pub async fn with_user(self, user: User) -> Self {
        self.users
            .insert(user)
            .await
            .expect("Failed to insert test user");
        self
    }

    /// Replace the admin configuration.
    pub fn with_config(mut self, config: StaticConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn users(&self) -> &InMemoryUsers {
        &self.users
    }

    pub fn config(&self) -> &StaticConfig {
        &self.config
    }

    pub fn audit(&self) -> &RecordingAudit {
        &self.audit
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// The collaborators as a server would hold them, with the real Argon2 verifier.
    pub fn collaborators(&self) -> Collaborators {
        Collaborators::new(self.users.clone(), self.config.clone()).with_audit(self.audit.clone())
    }

    /// Start a fresh session and return its id.
    pub async fn new_session(&self) -> SessionId {
        self.registry.create().await.0
    }

    /// The authority a request carrying `session_id` would get.
    pub async fn request(&self, session_id: &str) -> SessionAuthority {
        self.collaborators()
            .authority(self.registry.open(session_id).await)
    }
}
