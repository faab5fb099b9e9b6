// SPDX-License-Identifier: MIT

//! Trail-Viewer: browse your Strava activities on a map.
//!
//! This crate provides the backend API: it brokers OAuth access to
//! Strava, keeps the resulting credential in a signed client-side cookie,
//! and serves the activity list with decoded route polylines to the
//! bundled frontend.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{StravaClient, TokenCodec};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub strava: StravaClient,
    pub token_codec: TokenCodec,
}
