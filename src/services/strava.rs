// SPDX-License-Identifier: MIT

//! Strava API client.
//!
//! Covers the three calls this application makes:
//! - OAuth code-for-token exchange
//! - Authenticated athlete lookup
//! - Activity listing
//!
//! No retry or backoff anywhere; every upstream failure is terminal for
//! the request that triggered it.

use serde::Deserialize;

use crate::error::AppError;

/// Strava API client.
///
/// The base URL is injectable so tests can point it at a local mock
/// server; production uses [`StravaClient::new`].
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a client against the real Strava API.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self::with_base_url(client_id, client_secret, "https://www.strava.com".to_string())
    }

    /// Create a client against an arbitrary base URL (tests).
    pub fn with_base_url(client_id: String, client_secret: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            client_id,
            client_secret,
        }
    }

    /// Exchange an OAuth authorization code for a token grant.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant, AppError> {
        let url = format!("{}/oauth/token", self.base_url);

        let response = self
            .http
            .post(&url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(format!("Token exchange request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Get the athlete profile that owns `access_token`.
    ///
    /// The profile is kept opaque; we embed it in the session token
    /// without interpreting it.
    pub async fn get_athlete(&self, access_token: &str) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/api/v3/athlete", self.base_url);
        self.get_json(&url, access_token).await
    }

    /// List the athlete's activities.
    ///
    /// Single call, first page only. If Strava paginates, later pages are
    /// never fetched; known limitation.
    pub async fn list_activities(
        &self,
        access_token: &str,
    ) -> Result<Vec<StravaActivitySummary>, AppError> {
        let url = format!("{}/api/v3/athlete/activities", self.base_url);
        self.get_json(&url, access_token).await
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::StravaApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::StravaApi(format!("JSON parse error: {}", e)))
    }
}

/// A per-request client bound to one user's access token.
///
/// Constructed by the session middleware from the verified session token
/// and attached to the request; handlers never see the raw credential.
#[derive(Clone)]
pub struct UserStrava {
    client: StravaClient,
    access_token: String,
}

impl UserStrava {
    pub fn new(client: StravaClient, access_token: String) -> Self {
        Self {
            client,
            access_token,
        }
    }

    /// List this user's activities (first page).
    pub async fn list_activities(&self) -> Result<Vec<StravaActivitySummary>, AppError> {
        self.client.list_activities(&self.access_token).await
    }
}

/// Token grant from the OAuth code exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp at which `access_token` expires.
    pub expires_at: i64,
}

/// Summary activity as returned by `GET /api/v3/athlete/activities`.
#[derive(Debug, Clone, Deserialize)]
pub struct StravaActivitySummary {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub start_date: String,
    pub distance: f64,
    pub moving_time: i64,
    pub elapsed_time: i64,
    /// `[lat, lng]`; empty for activities without GPS data
    #[serde(default)]
    pub start_latlng: Vec<f64>,
    #[serde(default)]
    pub end_latlng: Vec<f64>,
    pub map: StravaMap,
}

/// Activity map data with the encoded summary polyline.
#[derive(Debug, Clone, Deserialize)]
pub struct StravaMap {
    pub summary_polyline: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_summary_deserializes_strava_shape() {
        let raw = serde_json::json!({
            "id": 321,
            "name": "Evening Run",
            "type": "Run",
            "start_date": "2024-05-30T18:00:00Z",
            "distance": 8000.5,
            "moving_time": 2400,
            "elapsed_time": 2500,
            "start_latlng": [38.5, -120.2],
            "end_latlng": [40.7, -120.95],
            "map": { "id": "a321", "summary_polyline": "_p~iF~ps|U_ulLnnqC" }
        });

        let summary: StravaActivitySummary = serde_json::from_value(raw).unwrap();
        assert_eq!(summary.id, 321);
        assert_eq!(summary.activity_type, "Run");
        assert_eq!(summary.start_latlng, vec![38.5, -120.2]);
        assert_eq!(
            summary.map.summary_polyline.as_deref(),
            Some("_p~iF~ps|U_ulLnnqC")
        );
    }

    #[test]
    fn test_activity_summary_tolerates_missing_latlng() {
        let raw = serde_json::json!({
            "id": 5,
            "name": "Trainer Session",
            "type": "VirtualRide",
            "start_date": "2024-05-30T18:00:00Z",
            "distance": 20000.0,
            "moving_time": 3600,
            "elapsed_time": 3600,
            "map": { "summary_polyline": null }
        });

        let summary: StravaActivitySummary = serde_json::from_value(raw).unwrap();
        assert!(summary.start_latlng.is_empty());
        assert!(summary.map.summary_polyline.is_none());
    }
}
