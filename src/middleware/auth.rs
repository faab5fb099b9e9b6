// SPDX-License-Identifier: MIT

//! Session authentication middleware.
//!
//! Gates protected routes on the signed session cookie. On success the
//! decoded session and a per-request Strava client are attached to the
//! request as typed extensions; on any failure the request ends here with
//! a generic 401. Whether the cookie was missing, tampered, or expired is
//! never revealed to the client.

use crate::error::AppError;
use crate::models::SessionClaims;
use crate::services::UserStrava;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Name of the cookie in which session tokens are stored.
pub const AUTH_COOKIE: &str = "authenticationToken";

/// Verified session attached to authenticated requests.
#[derive(Debug, Clone)]
pub struct Session {
    pub claims: SessionClaims,
}

/// Middleware that requires a valid session token.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(cookie) = jar.get(AUTH_COOKIE) else {
        return Err(AppError::Unauthorized);
    };

    let claims = state.token_codec.verify(cookie.value()).map_err(|e| {
        tracing::warn!(error = %e, "Failed to verify a session token");
        AppError::Unauthorized
    })?;

    // The codec does not enforce expiry; the embedded Strava credential
    // does. Once it lapses the user must restart the OAuth flow.
    if claims.is_expired(chrono::Utc::now().timestamp()) {
        tracing::warn!("Rejected session with expired Strava credential");
        return Err(AppError::Unauthorized);
    }

    let user_strava = UserStrava::new(
        state.strava.clone(),
        claims.strava.authentication.access_token.clone(),
    );

    request.extensions_mut().insert(Session { claims });
    request.extensions_mut().insert(user_strava);

    Ok(next.run(request).await)
}
