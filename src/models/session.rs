// SPDX-License-Identifier: MIT

//! Session token payload.
//!
//! The whole session rides in a signed cookie; the server keeps nothing.
//! The payload bundles the user's Strava credential with the athlete
//! profile the credential belongs to.

use serde::{Deserialize, Serialize};

/// Claims carried in the signed session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub strava: StravaSession,
}

/// Strava-specific session data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StravaSession {
    /// OAuth credential for per-user Strava API calls.
    pub authentication: StravaAuthentication,
    /// Athlete profile as returned by Strava. Opaque to us beyond
    /// pass-through; we never interpret its fields.
    pub athlete: serde_json::Value,
}

/// OAuth credential as returned by the Strava token exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StravaAuthentication {
    /// Unix timestamp at which the access token expires.
    pub expires_at: i64,
    pub refresh_token: String,
    pub access_token: String,
}

impl SessionClaims {
    /// Whether the embedded Strava credential has expired as of `now`
    /// (Unix seconds). There is no refresh flow; an expired credential
    /// means the user re-enters the OAuth flow.
    pub fn is_expired(&self, now: i64) -> bool {
        self.strava.authentication.expires_at <= now
    }
}
