//! Public server functions: the venue read path, review submission, the
//! geocoding proxy and the content/settings reads. Authorized admin and
//! owner calls live in `server_admin` and `server_owner`.

use leptos::prelude::*;
use leptos::server;
use serde::{Deserialize, Serialize};
use shared_types::VenueSummary;

use crate::db::entities::{ContentPage, Sponsor, VenueReview};
use crate::geocoding::GeocodeResponse;

#[cfg(feature = "ssr")]
use crate::db::content_repository::{get_content_page, get_site_setting};
#[cfg(feature = "ssr")]
use crate::db::repository::{
    directory_stats, get_venue_by_slug, insert_review, list_active_sponsors,
    list_approved_reviews, list_published_venues,
};
#[cfg(feature = "ssr")]
use crate::geocoding::{fallback, mapbox, postcodes};
#[cfg(feature = "ssr")]
use crate::utils::security::spam_reason;
#[cfg(feature = "ssr")]
use crate::utils::tokens::require_user;

/// All published, active venues with their approved-review aggregates.
#[server]
pub async fn fetch_venues() -> Result<Vec<VenueSummary>, ServerFnError> {
    match list_published_venues().await {
        Ok(venues) => Ok(venues),
        Err(e) => {
            tracing::error!("failed to list venues: {e}");
            Err(ServerFnError::new("Failed to load venues, please try again"))
        }
    }
}

#[server]
pub async fn fetch_venue(slug: String) -> Result<Option<VenueSummary>, ServerFnError> {
    match get_venue_by_slug(&slug).await {
        Ok(venue) => Ok(venue),
        Err(e) => {
            tracing::error!("failed to load venue {slug}: {e}");
            Err(ServerFnError::new("Failed to load venue, please try again"))
        }
    }
}

#[server]
pub async fn fetch_venue_reviews(venue_id: i64) -> Result<Vec<VenueReview>, ServerFnError> {
    match list_approved_reviews(venue_id).await {
        Ok(reviews) => Ok(reviews),
        Err(e) => {
            tracing::error!("failed to load reviews for venue {venue_id}: {e}");
            Err(ServerFnError::new("Failed to load reviews, please try again"))
        }
    }
}

/// Inserts a review for moderation. Requires a signed-in account; the body
/// passes the spam heuristics or the submission is refused with the reason.
#[server]
pub async fn submit_review(
    token: String,
    venue_id: i64,
    rating: i32,
    body: String,
) -> Result<(), ServerFnError> {
    let claims = require_user(&token).map_err(ServerFnError::new)?;

    if !(1..=5).contains(&rating) {
        return Err(ServerFnError::new("Rating must be between 1 and 5"));
    }
    if let Some(reason) = spam_reason(&body) {
        return Err(ServerFnError::new(reason));
    }

    match insert_review(venue_id, claims.user_id, rating, body.trim()).await {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!("failed to insert review: {e}");
            Err(ServerFnError::new("Failed to submit review, please try again"))
        }
    }
}

/// Geocoding proxy. The access token never reaches the client; when the
/// live service fails the static city list answers and the response is
/// flagged degraded.
#[server]
pub async fn geocode_search(query: String) -> Result<GeocodeResponse, ServerFnError> {
    let query = query.trim().to_string();
    if query.chars().count() < 2 {
        return Ok(GeocodeResponse { results: Vec::new(), degraded: false });
    }

    if postcodes::looks_like_uk_postcode(&query) {
        match postcodes::lookup(&query).await {
            Ok(Some(result)) => {
                return Ok(GeocodeResponse { results: vec![result], degraded: false });
            }
            Ok(None) => {} // unknown postcode, fall through to the places search
            Err(e) => {
                tracing::warn!("postcode lookup failed for '{query}': {e}");
            }
        }
    }

    match mapbox::geocode(&query).await {
        Ok(results) => Ok(GeocodeResponse { results, degraded: false }),
        Err(e) => {
            tracing::warn!("geocoding degraded to the static city list: {e}");
            Ok(GeocodeResponse {
                results: fallback::search_fallback_cities(&query),
                degraded: true,
            })
        }
    }
}

#[server]
pub async fn fetch_sponsors() -> Result<Vec<Sponsor>, ServerFnError> {
    match list_active_sponsors().await {
        Ok(sponsors) => Ok(sponsors),
        Err(e) => {
            tracing::error!("failed to list sponsors: {e}");
            Err(ServerFnError::new("Failed to load sponsors"))
        }
    }
}

#[server]
pub async fn fetch_content_page(slug: String) -> Result<Option<ContentPage>, ServerFnError> {
    match get_content_page(&slug).await {
        Ok(page) => Ok(page),
        Err(e) => {
            tracing::error!("failed to load content page {slug}: {e}");
            Err(ServerFnError::new("Failed to load page, please try again"))
        }
    }
}

/// Which map backend the site is configured to render ("tiles" or "svg").
#[server]
pub async fn fetch_map_backend() -> Result<String, ServerFnError> {
    match get_site_setting("map_backend").await {
        Ok(value) => Ok(value.unwrap_or_else(|| "tiles".to_string())),
        Err(e) => {
            tracing::error!("failed to read map_backend setting: {e}");
            Ok("tiles".to_string())
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct DirectoryStats {
    pub venue_count: i64,
    pub review_count: i64,
    pub city_count: i64,
}

#[server]
pub async fn fetch_directory_stats() -> Result<DirectoryStats, ServerFnError> {
    match directory_stats().await {
        Ok(stats) => Ok(DirectoryStats {
            venue_count: stats.venue_count,
            review_count: stats.review_count,
            city_count: stats.city_count,
        }),
        Err(e) => {
            tracing::error!("failed to compute directory stats: {e}");
            Err(ServerFnError::new("Failed to load stats"))
        }
    }
}
