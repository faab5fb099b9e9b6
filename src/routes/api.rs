// SPDX-License-Identifier: MIT

//! API routes for authenticated users.

use crate::error::Result;
use crate::models::ActivityRecord;
use crate::services::UserStrava;
use crate::AppState;
use axum::{routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

/// API routes (require a session; the middleware is applied in
/// routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/v0/strava/activities", get(get_activities))
}

/// Activity listing response.
#[derive(Serialize)]
pub struct ActivitiesResponse {
    pub activities: Vec<ActivityRecord>,
}

/// Fetch the user's activities from Strava and decode each summary
/// polyline into a drawable path.
async fn get_activities(
    Extension(user_strava): Extension<UserStrava>,
) -> Result<Json<ActivitiesResponse>> {
    let raw = user_strava.list_activities().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to get Strava user activities");
        e
    })?;

    let activities: Vec<ActivityRecord> = raw.into_iter().map(ActivityRecord::from).collect();

    tracing::debug!(count = activities.len(), "Fetched activities");

    Ok(Json(ActivitiesResponse { activities }))
}
