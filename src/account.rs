//! Account session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `AccountStore` owns the current session: the token issued at login and
//! the role fetched for it. The token is mirrored into [`SessionStorage`] on
//! every login and logout, so a store built with [`AccountStore::init`] picks
//! up where the last one left off.
//!
//! ERROR HANDLING
//! ==============
//! A failed backend call returns its [`ApiError`] untouched (wrapped in
//! [`AccountError::Api`]) and leaves the session state as it was.

#[cfg(test)]
#[path = "account_test.rs"]
mod account_test;

use std::fmt;

use crate::api;
use crate::api::account::{LoginRequest, LoginResponse, TokenRequest, UserInfoResponse};
use crate::storage::{SessionStorage, StorageError, TOKEN_KEY};
use crate::transport::{ApiError, Transport, decode};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// In-memory session. `role` is only meaningful while `token` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<String>,
    pub role: String,
}

/// Login form input. The username is trimmed before it is sent.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// STORE
// =============================================================================

pub struct AccountStore<T, S> {
    transport: T,
    storage: S,
    state: SessionState,
}

impl<T, S> AccountStore<T, S>
where
    T: Transport,
    S: SessionStorage,
{
    /// Build a store, restoring the token persisted in `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be read.
    pub fn init(transport: T, storage: S) -> Result<Self, AccountError> {
        let token = storage.get(TOKEN_KEY)?;
        tracing::debug!(restored = token.is_some(), "account store initialized");
        Ok(Self { transport, storage, state: SessionState { token, role: String::new() } })
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    #[must_use]
    pub fn role(&self) -> &str {
        &self.state.role
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.token.is_some()
    }

    /// The transport this store sends through, for issuing other API calls.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Log in and remember the issued token in memory and in storage.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged, [`ApiError::Decode`] if the
    /// response carries no token, or a storage error. State is untouched on
    /// any failure.
    pub async fn login(&mut self, credentials: Credentials) -> Result<(), AccountError> {
        let request = LoginRequest {
            username: credentials.username.trim().to_owned(),
            password: credentials.password,
        };
        let username = request.username.clone();

        let body = api::account::login(&self.transport, request)
            .await
            .inspect_err(|e| tracing::warn!(%username, error = %e, "login failed"))?;
        let token = decode::<LoginResponse>(body)?.data.login_info.token;

        self.storage.set(TOKEN_KEY, &token)?;
        self.state.token = Some(token);
        tracing::info!(%username, "logged in");
        Ok(())
    }

    /// Fetch the role for the current token.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged, or [`ApiError::Decode`] if the
    /// response carries no role. The role is untouched on failure.
    pub async fn get_user_info(&mut self) -> Result<(), AccountError> {
        let request = TokenRequest { token: self.state.token.clone() };

        let body = api::account::get_user_info(&self.transport, request)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "user info fetch failed"))?;
        let role = decode::<UserInfoResponse>(body)?.data.user_info.role;

        tracing::info!(%role, "user info loaded");
        self.state.role = role;
        Ok(())
    }

    /// Log out, reset the role, and wipe all of session storage.
    ///
    /// The in-memory token follows storage and is dropped as well. Once the
    /// backend has accepted the logout, memory is reset even if clearing
    /// storage then fails.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged (session kept) or a storage
    /// error (session already dropped from memory).
    pub async fn logout(&mut self) -> Result<(), AccountError> {
        let request = TokenRequest { token: self.state.token.clone() };

        api::account::logout(&self.transport, request)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "logout failed"))?;

        self.state = SessionState::default();
        self.storage.clear()?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Drop the session locally without calling the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be cleared.
    pub fn teardown(&mut self) -> Result<(), AccountError> {
        self.storage.clear()?;
        self.state = SessionState::default();
        tracing::debug!("account store torn down");
        Ok(())
    }
}
