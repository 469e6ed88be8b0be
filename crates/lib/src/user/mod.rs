//! User records and credential checking
//!
//! Provides the user record shape shared by every user store, the admin
//! credential configuration, and password verification.

pub mod crypto;
pub mod errors;
pub mod types;

pub use crypto::{Argon2Verifier, CredentialVerifier, hash_password, verify_password};
pub use errors::CredentialError;
pub use types::*;
