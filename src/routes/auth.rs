// SPDX-License-Identifier: MIT

//! Strava OAuth authentication routes.
//!
//! Three-legged flow: `/enter` redirects the user to Strava's
//! authorization page; Strava redirects back to `/oauth_callback` with a
//! code; we exchange the code, look up the owning athlete, and hand the
//! whole bundle back to the browser as a signed cookie. Nothing is stored
//! server-side, and a failed handshake just sends the user back to the
//! homepage with an error flag to restart from.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::sync::Arc;

use crate::config::OAUTH_CALLBACK_PATH;
use crate::middleware::auth::AUTH_COOKIE;
use crate::models::{SessionClaims, StravaAuthentication, StravaSession};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v0/auth/strava/enter", get(auth_enter))
        .route(OAUTH_CALLBACK_PATH, get(oauth_callback))
}

/// Redirect the user to the Strava OAuth authorization page.
///
/// Pure construction from config, no I/O.
async fn auth_enter(State(state): State<Arc<AppState>>) -> Redirect {
    let auth_url = format!(
        "https://www.strava.com/oauth/authorize?\
         client_id={}&\
         response_type=code&\
         redirect_uri={}&\
         approval_prompt=force&\
         scope=read,activity:read",
        state.config.strava_client_id,
        urlencoding::encode(&state.config.strava_redirect_uri),
    );

    tracing::info!(
        client_id = %state.config.strava_client_id,
        "Starting OAuth flow, redirecting to Strava"
    );

    Redirect::temporary(&auth_url)
}

/// Query parameters Strava sends to the callback.
#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback: exchange the code, fetch the athlete, set the session
/// cookie, and send the user to the app.
///
/// Every failure redirects with an `auth_error` flag and no cookie; the
/// user recovers by re-entering the flow.
async fn oauth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> (CookieJar, Redirect) {
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Strava");
        return (jar, Redirect::temporary("/?auth_error=strava"));
    }

    let Some(code) = params.code else {
        tracing::warn!("OAuth callback without a code parameter");
        return (jar, Redirect::temporary("/?auth_error=strava"));
    };

    // Exchange the code for a token grant.
    let grant = match state.strava.exchange_code(&code).await {
        Ok(grant) => grant,
        Err(e) => {
            tracing::error!(error = %e, "Failed to exchange a Strava OAuth code for a token");
            return (jar, Redirect::temporary("/?auth_error=strava"));
        }
    };

    // Figure out who this token belongs to; makes our life a lot easier
    // later on.
    let athlete = match state.strava.get_athlete(&grant.access_token).await {
        Ok(athlete) => athlete,
        Err(e) => {
            tracing::error!(error = %e, "Failed to get information about token owner");
            return (jar, Redirect::temporary("/?auth_error=strava"));
        }
    };

    let claims = SessionClaims {
        strava: StravaSession {
            authentication: StravaAuthentication {
                expires_at: grant.expires_at,
                refresh_token: grant.refresh_token,
                access_token: grant.access_token,
            },
            athlete,
        },
    };

    let token = match state.token_codec.sign(&claims) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "Failed to sign a session token");
            return (jar, Redirect::temporary("/?auth_error=internal"));
        }
    };

    tracing::info!("OAuth handshake complete, issuing session cookie");

    (
        jar.add(session_cookie(&state, token)),
        Redirect::temporary("/"),
    )
}

/// Build the session cookie with hardened attributes. `Secure` is set
/// whenever the deployment is reached over https (inferred from the
/// configured redirect URI).
fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    if state.config.strava_redirect_uri.starts_with("https://") {
        cookie.set_secure(true);
    }
    cookie
}
