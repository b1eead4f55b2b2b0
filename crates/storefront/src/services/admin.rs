//! Admin sessions.
//!
//! Logging in with the configured passcode mints an [`AdminSession`], the
//! capability every catalog or settings mutation requires. Sessions live in
//! memory and expire a fixed time after login; a restart logs everyone out.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use handset_core::SessionToken;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid passcode")]
    InvalidPasscode,
    #[error("missing or malformed bearer token")]
    MissingToken,
    #[error("session not found")]
    UnknownSession,
    #[error("session expired")]
    Expired,
}

/// Proof of a successful admin login.
///
/// Only [`AdminSessions`] can construct one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    token: SessionToken,
    expires_at: DateTime<Utc>,
}

impl AdminSession {
    #[must_use]
    pub const fn token(&self) -> SessionToken {
        self.token
    }

    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Check the session has not expired by `now`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Expired` once `now` reaches `expires_at`.
    pub fn ensure_live(&self, now: DateTime<Utc>) -> Result<(), AuthError> {
        if self.expires_at <= now {
            return Err(AuthError::Expired);
        }
        Ok(())
    }
}

/// Issues and checks admin sessions.
pub struct AdminSessions {
    passcode: SecretString,
    timeout: chrono::Duration,
    sessions: RwLock<HashMap<SessionToken, DateTime<Utc>>>,
}

impl AdminSessions {
    #[must_use]
    pub fn new(passcode: SecretString, timeout: Duration) -> Self {
        Self {
            passcode,
            timeout: chrono::Duration::from_std(timeout).unwrap_or(chrono::Duration::MAX),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Exchange the passcode for a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidPasscode` unless `passcode` matches exactly.
    #[instrument(skip_all)]
    pub fn login(&self, passcode: &str, now: DateTime<Utc>) -> Result<AdminSession, AuthError> {
        if passcode != self.passcode.expose_secret() {
            warn!("Admin login rejected");
            return Err(AuthError::InvalidPasscode);
        }

        let session = AdminSession {
            token: SessionToken::new_random(),
            expires_at: now.checked_add_signed(self.timeout).unwrap_or(DateTime::<Utc>::MAX_UTC),
        };

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.retain(|_, expires_at| *expires_at > now);
        sessions.insert(session.token, session.expires_at);
        info!(expires_at = %session.expires_at, "Admin session started");
        Ok(session)
    }

    /// Look up a live session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UnknownSession` for tokens never issued (or
    /// revoked) and `AuthError::Expired` for tokens past their lifetime.
    pub fn validate(
        &self,
        token: SessionToken,
        now: DateTime<Utc>,
    ) -> Result<AdminSession, AuthError> {
        let expires_at = {
            let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
            *sessions.get(&token).ok_or(AuthError::UnknownSession)?
        };

        if expires_at <= now {
            self.revoke(token);
            return Err(AuthError::Expired);
        }

        Ok(AdminSession { token, expires_at })
    }

    /// End a session. Unknown tokens are ignored.
    pub fn revoke(&self, token: SessionToken) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.remove(&token);
    }

    /// Number of sessions currently held, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
