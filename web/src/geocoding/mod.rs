//! Location resolution: a places-geocoding API as the primary path, a UK
//! postcode lookup for postcode-shaped queries, and a static city list the
//! search degrades to when the network path fails.

pub mod fallback;
pub mod mapbox;
pub mod postcodes;

use serde::{Deserialize, Serialize};
use shared_types::LocationResult;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("geocoding request failed: {0}")]
    Request(String),
    #[error("geocoding service returned status {0}")]
    Status(u16),
    #[error("malformed geocoding payload: {0}")]
    Payload(String),
    #[error("no access token configured")]
    MissingToken,
}

#[cfg(feature = "ssr")]
impl From<reqwest::Error> for GeocodingError {
    fn from(e: reqwest::Error) -> Self {
        GeocodingError::Request(e.to_string())
    }
}

/// What the `geocode_search` server function hands back to the client.
/// `degraded` is set when the static fallback answered instead of the
/// live service, so the UI can say so.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeocodeResponse {
    pub results: Vec<LocationResult>,
    pub degraded: bool,
}
