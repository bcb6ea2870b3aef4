pub mod filter;
pub mod geo;

pub use filter::{filter_venues, filter_venues_with_distance, SearchFilters};
pub use geo::{distance_km, LatLong, MapBounds};

use serde::{Deserialize, Serialize};

/// A resolved location: either a geocoding hit, a fallback city, or the
/// device position. Held in the search filter state until cleared or replaced.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationResult {
    pub name: String,
    pub coords: LatLong,
    pub address: String,
    pub postcode: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
}

/// The public payload for a published venue, as shown in the directory
/// and on the map.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VenueSummary {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub business_type: String,
    pub features: Vec<String>,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub logo_url: Option<String>,
    pub average_rating: Option<f64>,
    pub review_count: i64,
}

impl VenueSummary {
    /// Coordinates when the venue has been geocoded, `None` otherwise.
    pub fn coords(&self) -> Option<LatLong> {
        match (self.lat, self.long) {
            (Some(lat), Some(long)) => Some(LatLong { lat, long }),
            _ => None,
        }
    }
}
