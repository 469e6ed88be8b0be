//! Test doubles for the authority's collaborators
//!
//! Only built for tests or with the `testing` feature.
//!
//! - [`PlainVerifier`] treats the stored "hash" as the plaintext, so tests skip Argon2
//! - [`CountingUsers`] wraps a user store, counts lookups and can panic past a limit
//! - [`RecordingAudit`] keeps every audit record for inspection
//! - [`UnavailableStore`] fails every call, standing in for an unreachable backend

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    Result,
    audit::AuditLog,
    identity::UserId,
    session::SessionStore,
    store::{ConfigStore, StoreError, UserStore},
    user::{AdminCredentials, CredentialVerifier, User},
};

/// Verifier that compares plaintext and "hash" for equality.
///
/// An empty hash never verifies, like a real verifier given an unparsable hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainVerifier;

impl CredentialVerifier for PlainVerifier {
    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        !hash.is_empty() && plaintext == hash
    }
}

/// A user store wrapper counting `find_by_id` and `find_by_username` calls.
#[derive(Debug)]
pub struct CountingUsers<S> {
    inner: S,
    by_id: AtomicUsize,
    by_username: AtomicUsize,
    id_limit: Option<usize>,
}

impl<S: UserStore> CountingUsers<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            by_id: AtomicUsize::new(0),
            by_username: AtomicUsize::new(0),
            id_limit: None,
        }
    }

    /// Panic when `find_by_id` is called more than `limit` times.
    pub fn strict(inner: S, limit: usize) -> Self {
        Self {
            id_limit: Some(limit),
            ..Self::new(inner)
        }
    }

    pub fn id_lookups(&self) -> usize {
        self.by_id.load(Ordering::SeqCst)
    }

    pub fn username_lookups(&self) -> usize {
        self.by_username.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: UserStore> UserStore for CountingUsers<S> {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let calls = self.by_id.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(limit) = self.id_limit {
            assert!(
                calls <= limit,
                "user store queried by id {calls} times, limit is {limit}"
            );
        }
        self.inner.find_by_id(id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.by_username.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_username(username).await
    }
}

/// One record captured by [`RecordingAudit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditRecord {
    Notice(String),
    Error(String),
}

/// Audit log keeping every record in memory.
#[derive(Debug, Default)]
pub struct RecordingAudit {
    records: Mutex<Vec<AuditRecord>>,
}

impl RecordingAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.records()
            .into_iter()
            .filter_map(|record| match record {
                AuditRecord::Notice(message) => Some(message),
                AuditRecord::Error(_) => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.records()
            .into_iter()
            .filter_map(|record| match record {
                AuditRecord::Error(message) => Some(message),
                AuditRecord::Notice(_) => None,
            })
            .collect()
    }
}

impl AuditLog for RecordingAudit {
    fn notice(&self, message: &str) {
        self.records
            .lock()
            .unwrap()
            .push(AuditRecord::Notice(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.records
            .lock()
            .unwrap()
            .push(AuditRecord::Error(message.to_string()));
    }
}

/// A store whose every call fails with [`StoreError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl UnavailableStore {
    fn fail<T>() -> Result<T> {
        Err(StoreError::Unavailable {
            reason: "store is offline".to_string(),
        }
        .into())
    }
}

#[async_trait]
impl UserStore for UnavailableStore {
    async fn find_by_id(&self, _id: UserId) -> Result<Option<User>> {
        Self::fail()
    }

    async fn find_by_username(&self, _username: &str) -> Result<Option<User>> {
        Self::fail()
    }
}

#[async_trait]
impl ConfigStore for UnavailableStore {
    async fn get(&self) -> Result<AdminCredentials> {
        Self::fail()
    }
}

#[async_trait]
impl SessionStore for UnavailableStore {
    async fn get(&self, _key: &str) -> Result<Option<Value>> {
        Self::fail()
    }

    async fn insert(&self, _key: &str, _value: Value) -> Result<()> {
        Self::fail()
    }

    async fn remove(&self, _key: &str) -> Result<Option<Value>> {
        Self::fail()
    }

    async fn flush(&self) -> Result<()> {
        Self::fail()
    }
}
