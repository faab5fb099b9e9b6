// SPDX-License-Identifier: MIT

//! Services module - Strava client and session token codec.

pub mod strava;
pub mod token;

pub use strava::{StravaClient, UserStrava};
pub use token::{TokenCodec, TokenError};
