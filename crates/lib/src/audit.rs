//! Audit records
//!
//! Successful logins are recorded as notices; integrity faults (a session pointing at a
//! user that no longer exists, code asking for the admin's user record) as errors.
//!
//! Auditing is fire-and-forget. An [`AuditLog`] returns nothing, so a failing sink
//! can never fail or block the operation being audited.

/// Sink for audit records.
pub trait AuditLog: Send + Sync {
    /// Record a security relevant event that is expected, such as a login.
    fn notice(&self, message: &str);

    /// Record an integrity fault.
    fn error(&self, message: &str);
}

/// Writes audit records as `tracing` events under the `shutter::audit` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAudit;

impl AuditLog for TracingAudit {
    fn notice(&self, message: &str) {
        tracing::info!(target: "shutter::audit", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "shutter::audit", "{message}");
    }
}
