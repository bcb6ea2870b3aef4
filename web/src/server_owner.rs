//! Owner-facing server functions: listing applications, the venue change
//! pipeline, review replies, and the public sponsor-application form.

use leptos::prelude::*;
use leptos::server;
use serde::{Deserialize, Serialize};

use crate::db::entities::{Venue, VenueApplication, VenueReview};

#[cfg(feature = "ssr")]
use crate::db::moderation_repository::{
    insert_application, insert_pending_change, insert_review_reply,
    insert_sponsor_application, list_applications_for_owner, list_reviews_for_owner,
    list_venues_for_owner, NewApplication,
};
#[cfg(feature = "ssr")]
use crate::utils::security::{is_valid_email, spam_reason};
#[cfg(feature = "ssr")]
use crate::utils::tokens::{require_owner, require_user};
#[cfg(feature = "ssr")]
use crate::utils::uploads::{remove_logo, store_logo, uploads_dir, validate_logo, UploadError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueApplicationForm {
    pub venue_name: String,
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
}

/// Submits a listing application. The optional logo is validated by content
/// sniffing before anything touches the database; if the insert then fails
/// the stored file is removed again.
#[server]
pub async fn submit_venue_application(
    token: String,
    form: VenueApplicationForm,
    logo: Option<Vec<u8>>,
) -> Result<i64, ServerFnError> {
    let claims = require_owner(&token).map_err(ServerFnError::new)?;

    if form.venue_name.trim().is_empty() || form.address.trim().is_empty() {
        return Err(ServerFnError::new("Venue name and address are required"));
    }
    if let Some(reason) = spam_reason(&form.description) {
        return Err(ServerFnError::new(reason));
    }

    let logo_url = match &logo {
        Some(bytes) => {
            validate_logo(bytes).map_err(|e| ServerFnError::new(e.to_string()))?;
            let url = store_logo(&uploads_dir(), bytes).map_err(|e| match e {
                UploadError::Io(e) => {
                    tracing::error!("failed to store logo: {e}");
                    ServerFnError::new("Failed to store logo, please try again")
                }
                other => ServerFnError::new(other.to_string()),
            })?;
            Some(url)
        }
        None => None,
    };

    let applicant_name = match crate::db::account_repository::get_profile(claims.user_id).await {
        Ok(Some(profile)) => profile.display_name,
        _ => claims.sub.clone(),
    };

    let application = NewApplication {
        applicant_id: claims.user_id,
        applicant_name,
        applicant_email: claims.sub.clone(),
        venue_name: form.venue_name.trim().to_string(),
        description: form.description.trim().to_string(),
        business_type: form.business_type.trim().to_string(),
        features: form.features,
        address: form.address.trim().to_string(),
        city: form.city.trim().to_string(),
        postcode: form.postcode.trim().to_string(),
        lat: form.lat,
        long: form.long,
        website: form.website.filter(|w| !w.trim().is_empty()),
        phone: form.phone.filter(|p| !p.trim().is_empty()),
        logo_url: logo_url.clone(),
    };

    match insert_application(application).await {
        Ok(id) => Ok(id),
        Err(e) => {
            tracing::error!("failed to insert application: {e}");
            if let Some(url) = &logo_url {
                if let Err(e) = remove_logo(&uploads_dir(), url) {
                    tracing::warn!("orphaned logo {url} could not be removed: {e}");
                }
            }
            Err(ServerFnError::new("Failed to submit application, please try again"))
        }
    }
}

#[server]
pub async fn fetch_my_applications(token: String) -> Result<Vec<VenueApplication>, ServerFnError> {
    let claims = require_owner(&token).map_err(ServerFnError::new)?;
    match list_applications_for_owner(claims.user_id).await {
        Ok(applications) => Ok(applications),
        Err(e) => {
            tracing::error!("failed to list applications for owner {}: {e}", claims.user_id);
            Err(ServerFnError::new("Failed to load applications, please try again"))
        }
    }
}

#[server]
pub async fn fetch_my_venues(token: String) -> Result<Vec<Venue>, ServerFnError> {
    let claims = require_owner(&token).map_err(ServerFnError::new)?;
    match list_venues_for_owner(claims.user_id).await {
        Ok(venues) => Ok(venues),
        Err(e) => {
            tracing::error!("failed to list venues for owner {}: {e}", claims.user_id);
            Err(ServerFnError::new("Failed to load venues, please try again"))
        }
    }
}

/// Queues a field-diff edit against a published venue. The venue goes
/// offline until an admin rules on the change.
#[server]
pub async fn submit_venue_change(
    token: String,
    venue_id: i64,
    changes: serde_json::Value,
) -> Result<i64, ServerFnError> {
    let claims = require_owner(&token).map_err(ServerFnError::new)?;

    let Some(map) = changes.as_object() else {
        return Err(ServerFnError::new("No changes supplied"));
    };
    if map.is_empty() {
        return Err(ServerFnError::new("No changes supplied"));
    }

    match insert_pending_change(venue_id, claims.user_id, changes).await {
        Ok(change_id) => Ok(change_id),
        Err(e) => {
            tracing::error!("failed to queue change for venue {venue_id}: {e}");
            Err(ServerFnError::new("Failed to submit changes, please try again"))
        }
    }
}

#[server]
pub async fn fetch_owner_reviews(token: String) -> Result<Vec<VenueReview>, ServerFnError> {
    let claims = require_owner(&token).map_err(ServerFnError::new)?;
    match list_reviews_for_owner(claims.user_id).await {
        Ok(reviews) => Ok(reviews),
        Err(e) => {
            tracing::error!("failed to list reviews for owner {}: {e}", claims.user_id);
            Err(ServerFnError::new("Failed to load reviews, please try again"))
        }
    }
}

#[server]
pub async fn reply_to_review(
    token: String,
    review_id: i64,
    body: String,
) -> Result<(), ServerFnError> {
    let claims = require_owner(&token).map_err(ServerFnError::new)?;
    if body.trim().is_empty() {
        return Err(ServerFnError::new("Reply can't be empty"));
    }

    match insert_review_reply(review_id, claims.user_id, body.trim()).await {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!("failed to insert reply to review {review_id}: {e}");
            Err(ServerFnError::new("Failed to post reply, please try again"))
        }
    }
}

/// Open to anyone signed in; sponsorship enquiries don't need the owner role.
#[server]
pub async fn submit_sponsor_application(
    token: String,
    name: String,
    contact_email: String,
    website: Option<String>,
    message: String,
) -> Result<(), ServerFnError> {
    require_user(&token).map_err(ServerFnError::new)?;

    if name.trim().is_empty() {
        return Err(ServerFnError::new("Organisation name is required"));
    }
    if !is_valid_email(&contact_email) {
        return Err(ServerFnError::new("That email address doesn't look right"));
    }
    if let Some(reason) = spam_reason(&message) {
        return Err(ServerFnError::new(reason));
    }

    match insert_sponsor_application(
        name.trim(),
        contact_email.trim(),
        website.as_deref().map(str::trim).filter(|w| !w.is_empty()),
        message.trim(),
    )
    .await
    {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!("failed to insert sponsor application: {e}");
            Err(ServerFnError::new("Failed to submit application, please try again"))
        }
    }
}
