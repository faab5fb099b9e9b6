// SPDX-License-Identifier: MIT

//! Activity records returned by the API.
//!
//! Each record is a reshaped Strava activity summary with its encoded
//! summary polyline decoded into an ordered list of coordinates, ready
//! for the frontend to draw.

use serde::{Deserialize, Serialize};

use crate::services::strava::StravaActivitySummary;

/// A single decoded point on an activity's route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Activity as served to the frontend. Request-scoped, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub id: u64,
    pub start_date: String,
    /// Distance in meters
    pub distance: f64,
    /// Moving time in seconds
    pub moving_time: i64,
    /// Elapsed time in seconds
    pub elapsed_time: i64,
    /// `[lat, lng]` as reported by Strava, passed through unchanged
    pub start_location: Vec<f64>,
    pub end_location: Vec<f64>,
    /// The raw encoded summary polyline
    pub polyline: String,
    /// Decoded route, in order
    pub path: Vec<LatLng>,
}

impl From<StravaActivitySummary> for ActivityRecord {
    fn from(summary: StravaActivitySummary) -> Self {
        let polyline = summary.map.summary_polyline.unwrap_or_default();
        let path = decode_path(&polyline);

        Self {
            name: summary.name,
            activity_type: summary.activity_type,
            id: summary.id,
            start_date: summary.start_date,
            distance: summary.distance,
            moving_time: summary.moving_time,
            elapsed_time: summary.elapsed_time,
            start_location: summary.start_latlng,
            end_location: summary.end_latlng,
            polyline,
            path,
        }
    }
}

/// Decode a Strava summary polyline (Google encoding, precision 5) into an
/// ordered coordinate list. Pure and deterministic.
///
/// An undecodable or empty polyline yields an empty path rather than an
/// error: one activity with a broken route must not fail the whole listing.
pub fn decode_path(encoded: &str) -> Vec<LatLng> {
    if encoded.is_empty() {
        return Vec::new();
    }

    match polyline::decode_polyline(encoded, 5) {
        Ok(line) => line
            .into_iter()
            .map(|coord| LatLng {
                lat: coord.y,
                lng: coord.x,
            })
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to decode activity polyline");
            Vec::new()
        }
    }
}
