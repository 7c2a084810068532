//! Authentication lifecycle: restore, login, register, logout.
//!
//! Credentials live in exactly one place per tier: the key-value store on
//! disk, the [`Session`] in memory, and the token cell the API client
//! reads. Every transition updates all three, persisting first.

use std::sync::{Arc, PoisonError, RwLock};

use crate::api::ApiClient;
use crate::domain::UserProfile;
use crate::errors::{SessionError, StoreError};
use crate::storage::LocalStore;

/// Store key holding the bearer token.
const TOKEN_KEY: &str = "token";
/// Store key holding the serialized identity record.
const USER_KEY: &str = "user";

/// Sentinel id for locally synthesized profiles; the login endpoint never
/// returns a user record.
const LOCAL_PROFILE_ID: i64 = 1;

/// An authenticated identity and its bearer token. Holding both in one
/// value keeps them present-iff-authenticated by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub profile: UserProfile,
    pub token: String,
}

/// Owns the authentication state and its persistence.
#[derive(Debug)]
pub struct SessionManager {
    api: Arc<ApiClient>,
    store: Arc<LocalStore>,
    current: RwLock<Option<Session>>,
}

impl SessionManager {
    /// Starts unauthenticated. Call [`SessionManager::restore`] to pick up
    /// a persisted session.
    pub fn new(api: Arc<ApiClient>, store: Arc<LocalStore>) -> Self {
        SessionManager {
            api,
            store,
            current: RwLock::new(None),
        }
    }

    /// Rehydrates the session persisted by a previous run. With either key
    /// missing, or an unreadable identity record, the client stays
    /// unauthenticated. Call once at startup.
    pub fn restore(&self) {
        let (Some(token), Some(raw_profile)) =
            (self.store.get(TOKEN_KEY), self.store.get(USER_KEY))
        else {
            return;
        };
        let profile: UserProfile = match serde_json::from_str(&raw_profile) {
            Ok(profile) => profile,
            Err(err) => {
                tracing::warn!("discarding unreadable persisted identity: {err}");
                return;
            }
        };
        self.api.token().set(token.clone());
        self.set_current(Some(Session { profile, token }));
        tracing::debug!("session restored");
    }

    /// Authenticates against the API. On success the caller routes to the
    /// authenticated area; on any error the session is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), SessionError> {
        let token = match self.api.login(email, password).await? {
            Some(body) if !body.token.is_empty() => body.token,
            _ => return Err(SessionError::MissingToken),
        };

        let profile = profile_from_email(email);
        let raw_profile = serde_json::to_string(&profile).map_err(StoreError::from)?;
        self.store.set(TOKEN_KEY, &token)?;
        self.store.set(USER_KEY, &raw_profile)?;

        self.api.token().set(token.clone());
        self.set_current(Some(Session { profile, token }));
        tracing::info!("session opened");
        Ok(())
    }

    /// Creates an account without authenticating; the caller routes to the
    /// login screen on success.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, SessionError> {
        match self.api.register(name, email, password).await? {
            Some(profile) => Ok(profile),
            None => Err(SessionError::MissingProfile),
        }
    }

    /// Clears persisted and in-memory credentials. Always leaves the client
    /// unauthenticated; the caller routes to the login screen.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        self.api.token().clear();
        self.set_current(None);
        tracing::info!("session closed");
        Ok(())
    }

    /// Current session, if authenticated.
    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn set_current(&self, session: Option<Session>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = session;
    }
}

/// Builds the locally synthesized identity used in place of a server-issued
/// user record: a fixed sentinel id and the email's local part as display
/// name. Replace with real profile data once the API exposes it.
pub fn profile_from_email(email: &str) -> UserProfile {
    let display_name = email.split('@').next().unwrap_or(email).to_string();
    UserProfile {
        id: LOCAL_PROFILE_ID,
        display_name,
        email: email.to_string(),
    }
}
