// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod activity;
pub mod session;

pub use activity::{ActivityRecord, LatLng};
pub use session::{SessionClaims, StravaAuthentication, StravaSession};
