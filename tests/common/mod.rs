// SPDX-License-Identifier: MIT

//! Shared test helpers: app construction, mock Strava upstream, session
//! cookies.

use axum::Router;
use std::sync::Arc;
use trail_viewer::config::Config;
use trail_viewer::models::{SessionClaims, StravaAuthentication, StravaSession};
use trail_viewer::routes::create_router;
use trail_viewer::services::{StravaClient, TokenCodec};
use trail_viewer::AppState;

/// Create a test app whose Strava client points at `base_url`.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with_base_url(base_url: &str) -> (Router, Arc<AppState>) {
    let config = Config::test_default();

    let strava = StravaClient::with_base_url(
        config.strava_client_id.clone(),
        config.strava_client_secret.clone(),
        base_url.to_string(),
    );
    let token_codec = TokenCodec::new(config.authentication_token_secret.as_bytes());

    let state = Arc::new(AppState {
        config,
        strava,
        token_codec,
    });

    (create_router(state.clone()), state)
}

/// Create a test app with an unreachable upstream. Good enough for tests
/// that must never reach Strava (auth rejections) or that exercise the
/// upstream-failure path.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    // TCP port 9 (discard) is refused immediately on test hosts.
    create_test_app_with_base_url("http://127.0.0.1:9")
}

/// Serve `router` as a mock Strava upstream on an ephemeral port and
/// return its base URL.
#[allow(dead_code)]
pub async fn spawn_mock_strava(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock Strava listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Session claims with the given access token and expiry.
#[allow(dead_code)]
pub fn session_claims(access_token: &str, expires_at: i64) -> SessionClaims {
    SessionClaims {
        strava: StravaSession {
            authentication: StravaAuthentication {
                expires_at,
                refresh_token: "test_refresh_token".to_string(),
                access_token: access_token.to_string(),
            },
            athlete: serde_json::json!({ "id": 1337, "firstname": "Test" }),
        },
    }
}

/// A `Cookie` header value carrying a signed session token.
#[allow(dead_code)]
pub fn auth_cookie(state: &AppState, claims: &SessionClaims) -> String {
    let token = state
        .token_codec
        .sign(claims)
        .expect("Failed to sign test session token");
    format!("authenticationToken={}", token)
}
