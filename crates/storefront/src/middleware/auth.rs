//! Admin authentication extractor.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::Utc;

use handset_core::SessionToken;

use crate::error::AppError;
use crate::services::admin::{AdminSession, AuthError};
use crate::state::AppState;

/// Extractor that requires a live admin session.
///
/// Reads `Authorization: Bearer <token>` and rejects with 401 if the token
/// is missing, unknown or expired.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(session): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Session valid until {}", session.expires_at())
/// }
/// ```
pub struct RequireAdmin(pub AdminSession);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthError::MissingToken)?;
        let session = state.admin().validate(token, Utc::now())?;
        Ok(Self(session))
    }
}

fn bearer_token(parts: &Parts) -> Option<SessionToken> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    token.trim().parse().ok()
}
