//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup into an immutable [`Config`] that is
//! carried in the shared application state; nothing re-reads the
//! environment afterwards.

use std::env;

/// Path of the OAuth callback route. The configured Strava redirect URI
/// must point at this path or the whole flow silently breaks, so we check
/// it at startup.
pub const OAUTH_CALLBACK_PATH: &str = "/api/v0/auth/strava/oauth_callback";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Strava OAuth client ID (public)
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Strava OAuth redirect URI; must route to [`OAUTH_CALLBACK_PATH`]
    pub strava_redirect_uri: String,
    /// Application-level Strava access token (not used for per-user calls,
    /// kept for parity with the Strava app settings)
    pub strava_access_token: String,
    /// Symmetric key for signing session tokens
    pub authentication_token_secret: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let config = Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
            strava_client_id: env::var("STRAVA_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_ID"))?,
            strava_client_secret: env::var("STRAVA_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_SECRET"))?,
            strava_redirect_uri: env::var("STRAVA_REDIRECT_URI")
                .map_err(|_| ConfigError::Missing("STRAVA_REDIRECT_URI"))?,
            strava_access_token: env::var("STRAVA_ACCESS_TOKEN")
                .map_err(|_| ConfigError::Missing("STRAVA_ACCESS_TOKEN"))?,
            authentication_token_secret: env::var("APP_AUTHENTICATION_TOKEN_SECRET")
                .map_err(|_| ConfigError::Missing("APP_AUTHENTICATION_TOKEN_SECRET"))?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check startup invariants. A redirect URI that does not route to our
    /// callback endpoint would send users through a Strava handshake we can
    /// never complete, so refuse to start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.strava_redirect_uri.contains(OAUTH_CALLBACK_PATH) {
            return Err(ConfigError::RedirectUriMismatch {
                redirect_uri: self.strava_redirect_uri.clone(),
                callback_path: OAUTH_CALLBACK_PATH,
            });
        }
        Ok(())
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            strava_redirect_uri: format!("http://localhost:8080{OAUTH_CALLBACK_PATH}"),
            strava_access_token: "test_access_token".to_string(),
            authentication_token_secret: "test_token_secret_32_bytes_min!!".to_string(),
        }
    }
}

/// Configuration errors, all fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error(
        "Strava redirect URI '{redirect_uri}' does not route to the OAuth callback \
         endpoint '{callback_path}'; fix STRAVA_REDIRECT_URI or the flow cannot complete"
    )]
    RedirectUriMismatch {
        redirect_uri: String,
        callback_path: &'static str,
    },
}
