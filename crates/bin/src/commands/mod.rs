//! Subcommand implementations.
//!
//! Every command loads the files named by the global options, acts as one request
//! would, and writes back whatever it changed.

use std::sync::Arc;

use shutter::{
    Collaborators, SessionAuthority, SessionRegistry,
    store::{FileConfig, InMemoryUsers},
};

use crate::cli::FileArgs;

pub mod admin;
pub mod albums;
pub mod hash;
pub mod login;
pub mod session;

/// The on-disk state a command works against.
pub struct Workspace {
    files: FileArgs,
    users: Arc<InMemoryUsers>,
    config: Arc<FileConfig>,
    registry: SessionRegistry,
}

impl Workspace {
    pub async fn load(files: &FileArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let users = InMemoryUsers::load_from_file(&files.users).await?;
        let registry = SessionRegistry::load_from_file(&files.sessions).await?;
        Ok(Self {
            files: files.clone(),
            users: Arc::new(users),
            config: Arc::new(FileConfig::new(&files.config)),
            registry,
        })
    }

    pub fn users(&self) -> &InMemoryUsers {
        &self.users
    }

    pub fn config(&self) -> &FileConfig {
        &self.config
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators::new(self.users.clone(), self.config.clone())
    }

    /// The authority for an existing session. Unknown ids are an error rather than a
    /// fresh guest session, to catch typos.
    pub async fn authority(
        &self,
        session_id: &str,
    ) -> Result<SessionAuthority, Box<dyn std::error::Error>> {
        let session = self
            .registry
            .get(session_id)
            .await
            .ok_or_else(|| format!("unknown session {session_id}"))?;
        Ok(self.collaborators().authority(session))
    }

    pub async fn save_users(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.users.save_to_file(&self.files.users).await?;
        Ok(())
    }

    pub async fn save_sessions(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.registry.save_to_file(&self.files.sessions).await?;
        Ok(())
    }
}
