//! The session authority
//!
//! [`SessionAuthority`] answers every identity and authorization question a request can
//! ask, performs logins and logouts, and manages the album visibility allowlist.
//!
//! Construct one per request from a shared [`Collaborators`] and the request's session
//! store. The authority keeps a single-slot cache of the current user's record; that
//! cache lives and dies with the request and is never shared.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use shutter::{Collaborators, SessionRegistry, store::{InMemoryUsers, StaticConfig}};
//! # async fn handle(registry: SessionRegistry, session_id: &str) -> shutter::Result<()> {
//! let collaborators = Collaborators::new(
//!     Arc::new(InMemoryUsers::new()),
//!     Arc::new(StaticConfig::unset()),
//! );
//! let mut authority = collaborators.authority(registry.open(session_id).await);
//! if !authority.is_logged_in().await? {
//!     authority.try_passwordless_login().await?;
//! }
//! let may_upload = authority.can_upload().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::{
    Result,
    audit::{AuditLog, TracingAudit},
    identity::{Identity, UserId},
    session::{SessionState, SessionStore, VisibleAlbums},
    store::{ConfigStore, UserStore},
    user::{Argon2Verifier, CredentialVerifier, User},
};

mod errors;
pub use errors::SessionError;


/// The long-lived services every request's authority needs.
///
/// Cloning is cheap. Defaults to [`Argon2Verifier`] and [`TracingAudit`].
#[derive(Clone)]
pub struct Collaborators {
    users: Arc<dyn UserStore>,
    config: Arc<dyn ConfigStore>,
    verifier: Arc<dyn CredentialVerifier>,
    audit: Arc<dyn AuditLog>,
}

impl Collaborators {
    pub fn new(users: Arc<dyn UserStore>, config: Arc<dyn ConfigStore>) -> Self {
        Self {
            users,
            config,
            verifier: Arc::new(Argon2Verifier),
            audit: Arc::new(TracingAudit),
        }
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn with_audit(mut self, audit: Arc<dyn AuditLog>) -> Self {
        self.audit = audit;
        self
    }

    /// Build the authority for one request on `session`.
    pub fn authority(&self, session: Arc<dyn SessionStore>) -> SessionAuthority {
        SessionAuthority {
            session: SessionState::new(session),
            users: Arc::clone(&self.users),
            config: Arc::clone(&self.config),
            verifier: Arc::clone(&self.verifier),
            audit: Arc::clone(&self.audit),
            cached_user: None,
        }
    }
}

/// Request-scoped identity and authorization decisions for one session.
pub struct SessionAuthority {
    session: SessionState,
    users: Arc<dyn UserStore>,
    config: Arc<dyn ConfigStore>,
    verifier: Arc<dyn CredentialVerifier>,
    audit: Arc<dyn AuditLog>,
    /// Only ever holds the record of the session's current `Identity::User`
    cached_user: Option<User>,
}

impl SessionAuthority {
    /// The typed session this authority works on.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    // === Identity queries ===

    /// Whether the caller is logged in, as admin or as a user.
    pub async fn is_logged_in(&self) -> Result<bool> {
        self.session.login().await
    }

    /// Whether the caller is the logged in admin.
    pub async fn is_admin(&self) -> Result<bool> {
        Ok(self.identity().await?.is_admin())
    }

    /// The caller's identity, `Guest` when not logged in.
    pub async fn identity(&self) -> Result<Identity> {
        self.session.identity().await
    }

    /// The caller's identity, failing with [`SessionError::NotAuthenticated`] for guests.
    pub async fn current_identity(&self) -> Result<Identity> {
        match self.identity().await? {
            Identity::Guest => Err(SessionError::NotAuthenticated.into()),
            identity => Ok(identity),
        }
    }

    /// Whether the caller is the user `target`. The admin is every user.
    ///
    /// Never looks up a user record.
    pub async fn is_current_user(&self, target: u64) -> Result<bool> {
        Ok(self.identity().await?.satisfies(target))
    }

    /// Whether the caller may upload: always for the admin, otherwise per the
    /// user record's `upload` flag.
    ///
    /// Guests get [`SessionError::NotAuthenticated`] rather than `false`.
    pub async fn can_upload(&mut self) -> Result<bool> {
        if self.current_identity().await?.is_admin() {
            return Ok(true);
        }
        Ok(self.current_user().await?.upload)
    }

    /// The current user's record.
    ///
    /// The first successful call in a request reads the user store; later calls return
    /// the cached record without touching it.
    ///
    /// # Errors
    /// * [`SessionError::NotAuthenticated`] for guests
    /// * [`SessionError::AdminHasNoUserRecord`] for the admin; branch on
    ///   [`is_admin`](Self::is_admin) first
    /// * [`SessionError::UserNotFound`] when the session refers to a vanished user
    pub async fn current_user(&mut self) -> Result<&User> {
        let user = match self.cached_user.take() {
            Some(user) => user,
            None => self.resolve_user().await?,
        };
        Ok(&*self.cached_user.insert(user))
    }

    async fn resolve_user(&self) -> Result<User> {
        let id = match self.current_identity().await? {
            Identity::User(id) => id,
            Identity::Admin => {
                self.audit
                    .error("Trying to get a user record for the admin identity");
                return Err(SessionError::AdminHasNoUserRecord.into());
            }
            Identity::Guest => return Err(SessionError::NotAuthenticated.into()),
        };

        match self.users.find_by_id(id).await? {
            Some(user) if user.id == id => Ok(user),
            found => {
                if let Some(other) = found {
                    tracing::warn!(expected = %id, returned = %other.id, "user store returned a different user");
                }
                self.audit
                    .error(&format!("Could not find specified user ({id})"));
                Err(SessionError::UserNotFound { id }.into())
            }
        }
    }

    // === Authentication ===

    /// Log in as admin without credentials, if none are configured.
    ///
    /// Returns `true` and sets the admin identity only when both configured fields are
    /// the empty string. Otherwise the session is left untouched.
    pub async fn try_passwordless_login(&mut self) -> Result<bool> {
        if !self.config.get().await?.is_unset() {
            return Ok(false);
        }
        self.enter(Identity::Admin).await?;
        tracing::debug!("no admin credentials configured, logged in as admin");
        Ok(true)
    }

    /// Log in as a registered user.
    ///
    /// An unknown username and a wrong password give the same `Ok(false)` and leave no
    /// different trace. On success the record is cached for the rest of the request and
    /// an audit notice records the username and client address.
    pub async fn authenticate_user(
        &mut self,
        username: &str,
        password: &str,
        client_addr: &str,
    ) -> Result<bool> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .filter(|user| self.verifier.verify(password, &user.password_hash));
        let Some(user) = user else {
            tracing::debug!(client_addr, "user authentication rejected");
            return Ok(false);
        };

        self.enter(Identity::User(user.id)).await?;
        self.audit.notice(&format!(
            "User ({username}) has logged in from {client_addr}"
        ));
        self.cached_user = Some(user);
        Ok(true)
    }

    /// Log in as the admin.
    ///
    /// The username and the password are each verified against their configured hash.
    pub async fn authenticate_admin(
        &mut self,
        username: &str,
        password: &str,
        client_addr: &str,
    ) -> Result<bool> {
        let credentials = self.config.get().await?;
        let accepted = self.verifier.verify(username, &credentials.username)
            && self.verifier.verify(password, &credentials.password);
        if !accepted {
            tracing::debug!(client_addr, "admin authentication rejected");
            return Ok(false);
        }

        self.enter(Identity::Admin).await?;
        self.audit.notice(&format!(
            "Admin ({username}) has logged in from {client_addr}"
        ));
        Ok(true)
    }

    /// End the session: drop the cached record and erase every session key,
    /// visibility grants included.
    pub async fn logout(&mut self) -> Result<()> {
        self.cached_user = None;
        self.session.flush().await?;
        tracing::debug!("session logged out");
        Ok(())
    }

    /// Put the session into `identity` directly, skipping authentication.
    ///
    /// `Identity::Guest` is the same as [`logout`](Self::logout).
    #[cfg(any(test, feature = "testing"))]
    pub async fn login_as(&mut self, identity: Identity) -> Result<()> {
        match identity {
            Identity::Guest => self.logout().await,
            identity => self.enter(identity).await,
        }
    }

    async fn enter(&mut self, identity: Identity) -> Result<()> {
        let keep = self
            .cached_user
            .as_ref()
            .is_some_and(|user| Some(user.id) == identity.user_id());
        if !keep {
            self.cached_user = None;
        }
        self.session.set_identity(identity).await
    }

    // === Album visibility ===

    /// Whether `album` is on this session's allowlist.
    ///
    /// Deny by default, and the admin gets no bypass here.
    pub async fn has_visible_album(&self, album: &str) -> Result<bool> {
        Ok(self.session.visible_albums().await?.contains(album))
    }

    /// Add `album` to this session's allowlist. Granting twice is a no-op.
    ///
    /// This is a read-modify-write of the whole list; concurrent grants on the same
    /// session from parallel requests can lose one another.
    pub async fn grant_visible_album(&self, album: &str) -> Result<()> {
        let mut albums = self.session.visible_albums().await?;
        if albums.insert(album) {
            self.session.set_visible_albums(&albums).await?;
            tracing::debug!(album, "granted album visibility");
        }
        Ok(())
    }

    /// The whole allowlist.
    pub async fn visible_albums(&self) -> Result<VisibleAlbums> {
        self.session.visible_albums().await
    }

    /// The id of the cached user record, if one has been resolved this request.
    pub fn cached_user_id(&self) -> Option<UserId> {
        self.cached_user.as_ref().map(|user| user.id)
    }
}
