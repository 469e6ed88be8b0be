//! Error types for credential handling
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Password hashing failed: {reason}")]
    HashingFailed { reason: String },

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Password verification failed: stored hash is malformed")]
    MalformedHash,
}

impl CredentialError {
    /// Check if this error is a plain credential mismatch rather than a broken hash.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, CredentialError::InvalidPassword)
    }
}

impl From<CredentialError> for crate::Error {
    fn from(err: CredentialError) -> Self {
        crate::Error::Credential(err)
    }
}
