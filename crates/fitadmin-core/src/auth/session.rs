//! Session lifecycle for the admin console.
//!
//! `SessionStore` owns the authenticated principal for the life of the
//! process. It is created once around an `ApiClient`, initialized from the
//! persisted credential, and handed to whatever drives the UI.
//!
//! ```text
//! Uninitialized -> Checking -> Authenticated | Unauthenticated
//! Authenticated -> Unauthenticated   (logout, refresh failure)
//! ```

use thiserror::Error;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, ClientEvent, LoginCredentials, PasswordChange, PasswordReset};
use crate::models::User;

use super::token::Credential;

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";
const LOAD_USER_FAILED_MESSAGE: &str = "Failed to load user data";
const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";
const CHANGE_PASSWORD_FAILED_MESSAGE: &str = "Failed to change password";
const FORGOT_PASSWORD_FAILED_MESSAGE: &str = "Failed to process request";
const RESET_PASSWORD_FAILED_MESSAGE: &str = "Failed to reset password";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Uninitialized,
    Checking,
    Authenticated,
    Unauthenticated,
}

/// A failed session operation, carrying a message fit for display.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct AuthFailure {
    pub message: String,
    #[source]
    pub source: ApiError,
}

impl AuthFailure {
    fn new(message: &str, source: ApiError) -> Self {
        Self {
            message: message.to_string(),
            source,
        }
    }

    /// Use the server's explanation when it gave one
    fn from_api(source: ApiError, fallback: &str) -> Self {
        let message = source.server_message().unwrap_or(fallback).to_string();
        Self { message, source }
    }
}

pub struct SessionStore {
    api: ApiClient,
    events: broadcast::Receiver<ClientEvent>,
    state: AuthState,
    user: Option<User>,
    error: Option<String>,
}

impl SessionStore {
    pub fn new(api: ApiClient) -> Self {
        let events = api.subscribe();
        Self {
            api,
            events,
            state: AuthState::Uninitialized,
            user: None,
            error: None,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, AuthState::Uninitialized | AuthState::Checking)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Resolve the initial state from the persisted credential.
    pub async fn init(&mut self) -> AuthState {
        self.discard_events();
        self.state = AuthState::Checking;

        let Some(raw) = self.api.persisted_credential() else {
            debug!("No persisted credential");
            self.set_unauthenticated();
            return self.state;
        };

        let credential = match Credential::decode(&raw) {
            Ok(credential) => credential,
            Err(e) => {
                warn!(error = %e, "Discarding undecodable credential");
                self.api.clear_credential();
                self.set_unauthenticated();
                return self.state;
            }
        };

        // The refresh endpoint identifies the session by the old credential,
        // so it goes on the header even when expired.
        self.api.set_token(Some(credential.as_str()));

        if credential.is_expired() {
            info!(
                expired_at = ?credential.expires_at(),
                "Persisted credential expired, refreshing"
            );
            let _ = self.refresh_token().await;
        } else {
            let _ = self.load_user().await;
        }

        self.discard_events();
        info!(state = ?self.state, "Session initialized");
        self.state
    }

    /// Sign in with staff credentials.
    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<(), AuthFailure> {
        self.discard_events();

        let token = match self.api.admin_login(credentials).await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Login failed");
                let failure = AuthFailure::from_api(e, LOGIN_FAILED_MESSAGE);
                self.error = Some(failure.message.clone());
                return Err(failure);
            }
        };

        self.api.store_credential(&token);
        let loaded = self.load_user().await;
        self.discard_events();
        loaded.map_err(|e| AuthFailure::new(LOAD_USER_FAILED_MESSAGE, e))?;

        self.error = None;
        info!(email = %credentials.email, "Login successful");
        Ok(())
    }

    /// Drop the session. Never fails.
    pub fn logout(&mut self) {
        self.api.clear_credential();
        self.user = None;
        self.error = None;
        self.state = AuthState::Unauthenticated;
        info!("Logged out");
    }

    /// Exchange the current credential for a new one and reload the
    /// principal. Failure ends the session.
    pub async fn refresh_token(&mut self) -> Result<(), AuthFailure> {
        match self.api.refresh_credential().await {
            Ok(_) => self
                .load_user()
                .await
                .map_err(|e| AuthFailure::new(LOAD_USER_FAILED_MESSAGE, e)),
            Err(e) => {
                warn!(error = %e, "Refresh failed");
                self.api.clear_credential();
                self.set_unauthenticated();
                self.error = Some(SESSION_EXPIRED_MESSAGE.to_string());
                Err(AuthFailure::new(SESSION_EXPIRED_MESSAGE, e))
            }
        }
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), AuthFailure> {
        self.api.change_password(change).await.map_err(|e| {
            warn!(error = %e, "Change password failed");
            AuthFailure::from_api(e, CHANGE_PASSWORD_FAILED_MESSAGE)
        })
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthFailure> {
        self.api.forgot_password(email).await.map_err(|e| {
            warn!(error = %e, "Forgot password failed");
            AuthFailure::from_api(e, FORGOT_PASSWORD_FAILED_MESSAGE)
        })
    }

    pub async fn reset_password(&self, reset: &PasswordReset) -> Result<(), AuthFailure> {
        self.api.reset_password(reset).await.map_err(|e| {
            warn!(error = %e, "Reset password failed");
            AuthFailure::from_api(e, RESET_PASSWORD_FAILED_MESSAGE)
        })
    }

    /// Apply notifications raised by the client since the last call.
    /// Returns true when the session was ended by a failed refresh.
    pub fn sync(&mut self) -> bool {
        let mut login_required = false;
        loop {
            match self.events.try_recv() {
                Ok(ClientEvent::LoginRequired) | Err(TryRecvError::Lagged(_)) => {
                    login_required = true
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        if login_required && self.state == AuthState::Authenticated {
            info!("Session ended by failed refresh");
            self.set_unauthenticated();
            self.error = Some(SESSION_EXPIRED_MESSAGE.to_string());
        }
        login_required
    }

    async fn load_user(&mut self) -> Result<(), ApiError> {
        match self.api.current_user().await {
            Ok(user) => {
                debug!(user_id = %user.id, "Principal loaded");
                self.user = Some(user);
                self.state = AuthState::Authenticated;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load principal");
                self.api.clear_credential();
                self.set_unauthenticated();
                self.error = Some(LOAD_USER_FAILED_MESSAGE.to_string());
                Err(e)
            }
        }
    }

    fn set_unauthenticated(&mut self) {
        self.user = None;
        self.state = AuthState::Unauthenticated;
    }

    /// Events raised while this store was deciding the state itself are
    /// already accounted for.
    fn discard_events(&mut self) {
        while !matches!(
            self.events.try_recv(),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed)
        ) {}
    }
}
