//! Credential hashing and verification
//!
//! Provides the one-way credential check used by every login path:
//! - [`CredentialVerifier`], the seam the authority calls through
//! - [`Argon2Verifier`], the default implementation over Argon2id PHC strings
//! - [`hash_password`] for provisioning users and the admin configuration

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};

use super::errors::CredentialError;
use crate::Result;

/// One-way check of a plaintext against a stored hash.
///
/// Implementations must answer `false` for malformed or empty hashes instead of
/// failing, so that a broken record looks exactly like a wrong password.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

/// Argon2id verifier over PHC-format hash strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Verifier;

impl CredentialVerifier for Argon2Verifier {
    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        verify_password(plaintext, hash).is_ok()
    }
}

/// Hash a password using Argon2id
///
/// # Arguments
/// * `password` - The password to hash
///
/// # Returns
/// The Argon2 hash string (PHC format), salt included
pub fn hash_password(password: impl AsRef<str>) -> Result<String> {
    let salt = SaltString::generate(&mut rand_core::OsRng);

    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_ref().as_bytes(), &salt)
        .map_err(|e| CredentialError::HashingFailed {
            reason: e.to_string(),
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its hash
///
/// # Arguments
/// * `password` - The password to verify
/// * `password_hash` - The stored password hash (PHC format)
///
/// # Returns
/// Ok(()) if password is correct, Err otherwise
pub fn verify_password(password: impl AsRef<str>, password_hash: impl AsRef<str>) -> Result<()> {
    let parsed_hash =
        PasswordHash::new(password_hash.as_ref()).map_err(|_| CredentialError::MalformedHash)?;

    Argon2::default()
        .verify_password(password.as_ref().as_bytes(), &parsed_hash)
        .map_err(|_| CredentialError::InvalidPassword.into())
}
