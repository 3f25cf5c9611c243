//! Signed-in user session.
//!
//! The session is an explicit, cloneable context object rather than a
//! global. Observers hold a `watch` receiver of immutable snapshots; every
//! change goes through [`SessionContext::set_user_info`] or one of the
//! lifecycle operations built on it.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::clients::{AuthClient, UserClient};
use crate::domain::ports::{CredentialStore, CredentialStoreError, HttpTransport, Navigator};
use crate::domain::{Error, LoginInput, UserInfo};
use crate::query::QueryCache;
use crate::routes::{HOME_PATH, LOGIN_PATH};

/// Immutable snapshot of the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Profile of the signed-in user; `None` when signed out.
    pub user: Option<UserInfo>,
}

impl Session {
    /// Whether a user profile is loaded.
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Login name, empty when signed out.
    pub fn username(&self) -> &str {
        self.user.as_ref().map_or("", UserInfo::username)
    }

    /// Role name, the default role when signed out.
    pub fn role(&self) -> &str {
        self.user
            .as_ref()
            .map_or(crate::domain::DEFAULT_ROLE, UserInfo::role)
    }
}

/// Failures of session lifecycle operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The API rejected or failed a request.
    #[error(transparent)]
    Api(#[from] Error),
    /// The credential could not be persisted or removed.
    #[error(transparent)]
    Credentials(#[from] CredentialStoreError),
}

/// Cloneable handle to the session state and its collaborators.
#[derive(Clone)]
pub struct SessionContext {
    state: Arc<watch::Sender<Arc<Session>>>,
    credentials: Arc<dyn CredentialStore>,
    cache: QueryCache,
    navigator: Arc<dyn Navigator>,
    auth: AuthClient,
    users: UserClient,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("session", &self.current())
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Start signed out.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<dyn CredentialStore>,
        cache: QueryCache,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (state, _) = watch::channel(Arc::new(Session::default()));
        Self {
            state: Arc::new(state),
            credentials,
            cache,
            navigator,
            auth: AuthClient::new(Arc::clone(&transport)),
            users: UserClient::new(transport),
        }
    }

    /// Current snapshot.
    pub fn current(&self) -> Arc<Session> {
        Arc::clone(&self.state.borrow())
    }

    /// Observe snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Session>> {
        self.state.subscribe()
    }

    /// Shallow-merge `info` into the current profile and publish the result.
    ///
    /// Fields present in `info` win; fields it lacks keep their prior value.
    pub fn set_user_info(&self, info: UserInfo) -> Arc<Session> {
        let mut published = None;
        self.state.send_modify(|current| {
            let merged = current
                .user
                .clone()
                .unwrap_or_default()
                .merged_with(info);
            let next = Arc::new(Session { user: Some(merged) });
            *current = Arc::clone(&next);
            published = Some(next);
        });
        published.unwrap_or_else(|| self.current())
    }

    /// Re-read `me` and merge it into the session.
    ///
    /// # Errors
    ///
    /// Returns the failure of the `me` request; the session is unchanged.
    pub async fn refresh_user(&self) -> Result<Arc<Session>, Error> {
        let me = self.users.me().await?;
        Ok(self.set_user_info(me))
    }

    /// Exchange credentials for a token, persist it, load the profile, and
    /// open the home view.
    ///
    /// # Errors
    ///
    /// Returns the first failing step. A token that was stored before the
    /// profile request failed stays stored.
    pub async fn login(&self, credentials: &LoginInput) -> Result<Arc<Session>, SessionError> {
        let token = self.auth.token(credentials).await?;
        self.credentials.store(&token)?;
        let session = self.refresh_user().await?;
        info!(username = session.username(), "signed in");
        self.navigate(HOME_PATH);
        Ok(session)
    }

    /// Forget the credential, drop every cached read, reset the session,
    /// and open the login view.
    ///
    /// Every step runs even when removing the credential fails.
    ///
    /// # Errors
    ///
    /// Returns the credential removal failure, after the other steps ran.
    pub fn logout(&self) -> Result<(), SessionError> {
        let removed = self.credentials.remove();
        if let Err(error) = &removed {
            warn!(%error, "failed to remove credential during logout");
        }
        self.cache.clear();
        self.state.send_replace(Arc::new(Session::default()));
        info!("signed out");
        self.navigate(LOGIN_PATH);
        removed.map_err(SessionError::from)
    }

    fn navigate(&self, path: &str) {
        if let Err(error) = self.navigator.push(path) {
            warn!(%path, %error, "session navigation failed");
        }
    }
}
