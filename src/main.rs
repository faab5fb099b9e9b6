// SPDX-License-Identifier: MIT

//! Trail-Viewer API server.
//!
//! Brokers Strava OAuth, hands the credential back to the browser in a
//! signed cookie, and serves an activity list with decoded route
//! geometry plus the static frontend that renders it.

use std::sync::Arc;
use trail_viewer::{
    config::Config,
    services::{StravaClient, TokenCodec},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment. This also checks that the
    // configured Strava redirect URI routes to our callback endpoint;
    // a mismatch is fatal here, before we bind anything.
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Trail-Viewer API");

    let strava = StravaClient::new(
        config.strava_client_id.clone(),
        config.strava_client_secret.clone(),
    );

    let token_codec = TokenCodec::new(config.authentication_token_secret.as_bytes());

    let state = Arc::new(AppState {
        config: config.clone(),
        strava,
        token_codec,
    });

    let app = trail_viewer::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trail_viewer=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
