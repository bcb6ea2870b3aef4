//! Admin-only server functions. Every call verifies the token and the admin
//! role before touching the database; moderation writes go through the
//! transition-guarded repository so illegal advances surface as errors here.

use leptos::prelude::*;
use leptos::server;

use crate::db::entities::{
    DataRightsRequest, PendingChange, SiteSetting, SponsorApplication, UserAccount,
    VenueApplication, VenueReview,
};

#[cfg(feature = "ssr")]
use crate::db::account_repository::{
    complete_data_rights_request, get_account_email, list_accounts, list_data_rights_requests,
    set_account_role,
};
#[cfg(feature = "ssr")]
use crate::db::content_repository::{list_site_settings, upsert_content_page, upsert_site_setting};
#[cfg(feature = "ssr")]
use crate::db::entities::{ApplicationStatus, ReviewOutcome, Role};
#[cfg(feature = "ssr")]
use crate::db::moderation_repository::{
    approve_review, delete_review, list_applications, list_pending_changes,
    list_pending_sponsor_applications, list_unapproved_reviews, publish_application,
    resolve_pending_change, resolve_sponsor_application, set_application_status,
};
#[cfg(feature = "ssr")]
use crate::utils::tokens::require_admin;

#[server]
pub async fn fetch_applications(
    token: String,
    status: Option<String>,
) -> Result<Vec<VenueApplication>, ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    match list_applications(status.as_deref()).await {
        Ok(applications) => Ok(applications),
        Err(e) => {
            tracing::error!("failed to list applications: {e}");
            Err(ServerFnError::new("Failed to load applications, please try again"))
        }
    }
}

#[server]
pub async fn approve_application(token: String, application_id: i64) -> Result<(), ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    match set_application_status(application_id, ApplicationStatus::Approved).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("failed to approve application {application_id}: {e}");
            Err(ServerFnError::new(format!("Failed to approve application: {e}")))
        }
    }
}

#[server]
pub async fn reject_application(token: String, application_id: i64) -> Result<(), ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    match set_application_status(application_id, ApplicationStatus::Rejected).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("failed to reject application {application_id}: {e}");
            Err(ServerFnError::new(format!("Failed to reject application: {e}")))
        }
    }
}

/// Publishes an approved application as a live venue; returns the venue id.
#[server]
pub async fn publish_approved_application(
    token: String,
    application_id: i64,
) -> Result<i64, ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    match publish_application(application_id).await {
        Ok(venue_id) => Ok(venue_id),
        Err(e) => {
            tracing::error!("failed to publish application {application_id}: {e}");
            Err(ServerFnError::new(format!("Failed to publish application: {e}")))
        }
    }
}

#[server]
pub async fn fetch_pending_changes(token: String) -> Result<Vec<PendingChange>, ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    match list_pending_changes().await {
        Ok(changes) => Ok(changes),
        Err(e) => {
            tracing::error!("failed to list pending changes: {e}");
            Err(ServerFnError::new("Failed to load pending changes, please try again"))
        }
    }
}

#[server]
pub async fn rule_on_pending_change(
    token: String,
    change_id: i64,
    approve: bool,
) -> Result<(), ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    let outcome = if approve { ReviewOutcome::Approved } else { ReviewOutcome::Rejected };
    match resolve_pending_change(change_id, outcome).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("failed to resolve pending change {change_id}: {e}");
            Err(ServerFnError::new(format!("Failed to resolve change: {e}")))
        }
    }
}

#[server]
pub async fn fetch_review_queue(token: String) -> Result<Vec<VenueReview>, ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    match list_unapproved_reviews().await {
        Ok(reviews) => Ok(reviews),
        Err(e) => {
            tracing::error!("failed to list unapproved reviews: {e}");
            Err(ServerFnError::new("Failed to load review queue, please try again"))
        }
    }
}

#[server]
pub async fn approve_queued_review(token: String, review_id: i64) -> Result<(), ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    match approve_review(review_id).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("failed to approve review {review_id}: {e}");
            Err(ServerFnError::new("Failed to approve review, please try again"))
        }
    }
}

#[server]
pub async fn remove_review(token: String, review_id: i64) -> Result<(), ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    match delete_review(review_id).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("failed to remove review {review_id}: {e}");
            Err(ServerFnError::new("Failed to remove review, please try again"))
        }
    }
}

#[server]
pub async fn fetch_sponsor_queue(token: String) -> Result<Vec<SponsorApplication>, ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    match list_pending_sponsor_applications().await {
        Ok(applications) => Ok(applications),
        Err(e) => {
            tracing::error!("failed to list sponsor applications: {e}");
            Err(ServerFnError::new("Failed to load sponsor queue, please try again"))
        }
    }
}

#[server]
pub async fn rule_on_sponsor_application(
    token: String,
    application_id: i64,
    approve: bool,
) -> Result<(), ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    let outcome = if approve { ReviewOutcome::Approved } else { ReviewOutcome::Rejected };
    match resolve_sponsor_application(application_id, outcome).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("failed to resolve sponsor application {application_id}: {e}");
            Err(ServerFnError::new(format!("Failed to resolve application: {e}")))
        }
    }
}

#[server]
pub async fn fetch_users(token: String) -> Result<Vec<UserAccount>, ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    match list_accounts().await {
        Ok(accounts) => Ok(accounts),
        Err(e) => {
            tracing::error!("failed to list accounts: {e}");
            Err(ServerFnError::new("Failed to load users, please try again"))
        }
    }
}

#[server]
pub async fn set_user_role(token: String, user_id: i64, role: String) -> Result<(), ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    let Some(role) = Role::parse(&role) else {
        return Err(ServerFnError::new("Unknown role"));
    };
    match set_account_role(user_id, role.as_str()).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("failed to set role for user {user_id}: {e}");
            Err(ServerFnError::new("Failed to update role, please try again"))
        }
    }
}

#[server]
pub async fn lookup_user_email(token: String, user_id: i64) -> Result<Option<String>, ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    match get_account_email(user_id).await {
        Ok(email) => Ok(email),
        Err(e) => {
            tracing::error!("failed to look up email for user {user_id}: {e}");
            Err(ServerFnError::new("Failed to look up user"))
        }
    }
}

#[server]
pub async fn fetch_data_rights_queue(
    token: String,
) -> Result<Vec<DataRightsRequest>, ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    match list_data_rights_requests().await {
        Ok(requests) => Ok(requests),
        Err(e) => {
            tracing::error!("failed to list data rights requests: {e}");
            Err(ServerFnError::new("Failed to load requests, please try again"))
        }
    }
}

#[server]
pub async fn complete_data_rights(token: String, request_id: i64) -> Result<(), ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    match complete_data_rights_request(request_id).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("failed to complete data rights request {request_id}: {e}");
            Err(ServerFnError::new("Failed to complete request, please try again"))
        }
    }
}

#[server]
pub async fn fetch_site_settings(token: String) -> Result<Vec<SiteSetting>, ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    match list_site_settings().await {
        Ok(settings) => Ok(settings),
        Err(e) => {
            tracing::error!("failed to list site settings: {e}");
            Err(ServerFnError::new("Failed to load settings, please try again"))
        }
    }
}

#[server]
pub async fn update_site_setting(
    token: String,
    key: String,
    value: String,
) -> Result<(), ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    if key == "map_backend" && value != "tiles" && value != "svg" {
        return Err(ServerFnError::new("map_backend must be 'tiles' or 'svg'"));
    }
    match upsert_site_setting(&key, &value).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("failed to update setting {key}: {e}");
            Err(ServerFnError::new("Failed to update setting, please try again"))
        }
    }
}

#[server]
pub async fn update_content_page(
    token: String,
    slug: String,
    title: String,
    body: String,
) -> Result<(), ServerFnError> {
    require_admin(&token).map_err(ServerFnError::new)?;
    if slug.trim().is_empty() || title.trim().is_empty() {
        return Err(ServerFnError::new("Slug and title are required"));
    }
    match upsert_content_page(slug.trim(), title.trim(), &body).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("failed to update content page {slug}: {e}");
            Err(ServerFnError::new("Failed to update page, please try again"))
        }
    }
}
