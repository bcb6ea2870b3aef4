//! Admin and owner write paths: the application/publish pipeline, pending
//! changes, review moderation, and sponsor queues. Every status advance is
//! guarded by the entity's transition table and multi-step writes run in one
//! transaction.

use sqlx::postgres::PgRow;
use sqlx::Row;
use thiserror::Error;

use super::entities::{
    ApplicationStatus, PendingChange, ReviewOutcome, SponsorApplication, VenueApplication,
    VenueReview,
};
use super::pool::get_pool;
use crate::utils::slug::slugify;

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("unknown status '{0}'")]
    UnknownStatus(String),
    #[error("illegal status transition {from} -> {to}")]
    IllegalTransition { from: String, to: String },
    #[error("record not found")]
    NotFound,
}

fn application_from_row(row: &PgRow) -> Result<VenueApplication, sqlx::Error> {
    Ok(VenueApplication {
        id: row.try_get("id")?,
        applicant_id: row.try_get("applicant_id")?,
        applicant_name: row.try_get("applicant_name")?,
        applicant_email: row.try_get("applicant_email")?,
        venue_name: row.try_get("venue_name")?,
        description: row.try_get("description")?,
        business_type: row.try_get("business_type")?,
        features: row.try_get("features")?,
        address: row.try_get("address")?,
        city: row.try_get("city")?,
        postcode: row.try_get("postcode")?,
        lat: row.try_get("lat")?,
        long: row.try_get("long")?,
        website: row.try_get("website")?,
        phone: row.try_get("phone")?,
        logo_url: row.try_get("logo_url")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
    })
}

const APPLICATION_COLUMNS: &str = r#"
    id, applicant_id, applicant_name, applicant_email, venue_name, description,
    business_type, features, address, city, postcode, lat, long, website, phone,
    logo_url, status, created_at::text AS created_at
"#;

pub struct NewApplication {
    pub applicant_id: i64,
    pub applicant_name: String,
    pub applicant_email: String,
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
    pub logo_url: Option<String>,
}

pub async fn insert_application(app: NewApplication) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO venue_applications
            (applicant_id, applicant_name, applicant_email, venue_name, description,
             business_type, features, address, city, postcode, lat, long, website,
             phone, logo_url, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, 'pending')
        RETURNING id
        "#,
    )
    .bind(app.applicant_id)
    .bind(&app.applicant_name)
    .bind(&app.applicant_email)
    .bind(&app.venue_name)
    .bind(&app.description)
    .bind(&app.business_type)
    .bind(&app.features)
    .bind(&app.address)
    .bind(&app.city)
    .bind(&app.postcode)
    .bind(app.lat)
    .bind(app.long)
    .bind(&app.website)
    .bind(&app.phone)
    .bind(&app.logo_url)
    .fetch_one(get_pool())
    .await?;
    row.try_get("id")
}

pub async fn list_applications(status: Option<&str>) -> Result<Vec<VenueApplication>, sqlx::Error> {
    let rows = match status {
        Some(status) => {
            sqlx::query(&format!(
                "SELECT {APPLICATION_COLUMNS} FROM venue_applications WHERE status = $1 ORDER BY created_at ASC"
            ))
            .bind(status)
            .fetch_all(get_pool())
            .await?
        }
        None => {
            sqlx::query(&format!(
                "SELECT {APPLICATION_COLUMNS} FROM venue_applications ORDER BY created_at ASC"
            ))
            .fetch_all(get_pool())
            .await?
        }
    };
    rows.iter().map(application_from_row).collect()
}

pub async fn list_applications_for_owner(
    applicant_id: i64,
) -> Result<Vec<VenueApplication>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "SELECT {APPLICATION_COLUMNS} FROM venue_applications WHERE applicant_id = $1 ORDER BY created_at DESC"
    ))
    .bind(applicant_id)
    .fetch_all(get_pool())
    .await?;
    rows.iter().map(application_from_row).collect()
}

/// `pending -> approved | rejected`. Anything else is refused.
pub async fn set_application_status(
    application_id: i64,
    next: ApplicationStatus,
) -> Result<(), ModerationError> {
    let row = sqlx::query("SELECT status FROM venue_applications WHERE id = $1")
        .bind(application_id)
        .fetch_optional(get_pool())
        .await?
        .ok_or(ModerationError::NotFound)?;

    let current: String = row.try_get("status")?;
    let current = ApplicationStatus::parse(&current)
        .ok_or_else(|| ModerationError::UnknownStatus(current.clone()))?;
    if !current.can_transition_to(next) {
        return Err(ModerationError::IllegalTransition {
            from: current.as_str().to_string(),
            to: next.as_str().to_string(),
        });
    }

    sqlx::query("UPDATE venue_applications SET status = $2 WHERE id = $1")
        .bind(application_id)
        .bind(next.as_str())
        .execute(get_pool())
        .await?;
    Ok(())
}

/// `approved -> published`: inserts the public venue row and marks the
/// application published in one transaction. Returns the new venue id.
pub async fn publish_application(application_id: i64) -> Result<i64, ModerationError> {
    let mut tx = get_pool().begin().await?;

    let row = sqlx::query(&format!(
        "SELECT {APPLICATION_COLUMNS} FROM venue_applications WHERE id = $1 FOR UPDATE"
    ))
    .bind(application_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(ModerationError::NotFound)?;
    let app = application_from_row(&row)?;

    let current = ApplicationStatus::parse(&app.status)
        .ok_or_else(|| ModerationError::UnknownStatus(app.status.clone()))?;
    if !current.can_transition_to(ApplicationStatus::Published) {
        return Err(ModerationError::IllegalTransition {
            from: current.as_str().to_string(),
            to: ApplicationStatus::Published.as_str().to_string(),
        });
    }

    let slug = unique_slug(&mut tx, &app.venue_name).await?;
    let venue_row = sqlx::query(
        r#"
        INSERT INTO venues
            (slug, name, description, business_type, features, address, city,
             postcode, lat, long, website, phone, logo_url, owner_id, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, TRUE)
        RETURNING id
        "#,
    )
    .bind(&slug)
    .bind(&app.venue_name)
    .bind(&app.description)
    .bind(&app.business_type)
    .bind(&app.features)
    .bind(&app.address)
    .bind(&app.city)
    .bind(&app.postcode)
    .bind(app.lat)
    .bind(app.long)
    .bind(&app.website)
    .bind(&app.phone)
    .bind(&app.logo_url)
    .bind(app.applicant_id)
    .fetch_one(&mut *tx)
    .await?;
    let venue_id: i64 = venue_row.try_get("id")?;

    sqlx::query("UPDATE venue_applications SET status = 'published' WHERE id = $1")
        .bind(application_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(venue_id)
}

// Slug uniqueness is also enforced by the schema; the numeric suffix here
// keeps the common collision case from surfacing as a constraint error.
async fn unique_slug(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    name: &str,
) -> Result<String, sqlx::Error> {
    let base = slugify(name);
    let mut candidate = base.clone();
    let mut n = 1;
    loop {
        let exists = sqlx::query("SELECT 1 FROM venues WHERE slug = $1")
            .bind(&candidate)
            .fetch_optional(&mut **tx)
            .await?
            .is_some();
        if !exists {
            return Ok(candidate);
        }
        n += 1;
        candidate = format!("{base}-{n}");
    }
}

fn pending_change_from_row(row: &PgRow) -> Result<PendingChange, sqlx::Error> {
    Ok(PendingChange {
        id: row.try_get("id")?,
        venue_id: row.try_get("venue_id")?,
        venue_name: row.try_get("venue_name")?,
        changes: row.try_get("changes")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Records a field-diff against a published venue and deactivates the venue
/// until an admin rules on it. One transaction.
pub async fn insert_pending_change(
    venue_id: i64,
    owner_id: i64,
    changes: serde_json::Value,
) -> Result<i64, ModerationError> {
    let mut tx = get_pool().begin().await?;

    let owned = sqlx::query("SELECT 1 FROM venues WHERE id = $1 AND owner_id = $2")
        .bind(venue_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?
        .is_some();
    if !owned {
        return Err(ModerationError::NotFound);
    }

    let row = sqlx::query(
        r#"
        INSERT INTO venue_pending_changes (venue_id, changes, status)
        VALUES ($1, $2, 'pending')
        RETURNING id
        "#,
    )
    .bind(venue_id)
    .bind(&changes)
    .fetch_one(&mut *tx)
    .await?;
    let change_id: i64 = row.try_get("id")?;

    sqlx::query("UPDATE venues SET is_active = FALSE WHERE id = $1")
        .bind(venue_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(change_id)
}

pub async fn list_pending_changes() -> Result<Vec<PendingChange>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT c.id, c.venue_id, v.name AS venue_name, c.changes, c.status,
               c.created_at::text AS created_at
        FROM venue_pending_changes c
        JOIN venues v ON v.id = c.venue_id
        WHERE c.status = 'pending'
        ORDER BY c.created_at ASC
        "#,
    )
    .fetch_all(get_pool())
    .await?;
    rows.iter().map(pending_change_from_row).collect()
}

/// Approval applies the diff and reactivates the venue; rejection discards
/// it and reactivates. Either way the change record keeps its outcome.
pub async fn resolve_pending_change(
    change_id: i64,
    outcome: ReviewOutcome,
) -> Result<(), ModerationError> {
    let mut tx = get_pool().begin().await?;

    let row = sqlx::query(
        "SELECT venue_id, changes, status FROM venue_pending_changes WHERE id = $1 FOR UPDATE",
    )
    .bind(change_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(ModerationError::NotFound)?;

    let current: String = row.try_get("status")?;
    let current = ReviewOutcome::parse(&current)
        .ok_or_else(|| ModerationError::UnknownStatus(current.clone()))?;
    if !current.can_transition_to(outcome) {
        return Err(ModerationError::IllegalTransition {
            from: current.as_str().to_string(),
            to: outcome.as_str().to_string(),
        });
    }

    let venue_id: i64 = row.try_get("venue_id")?;
    let changes: serde_json::Value = row.try_get("changes")?;

    if outcome == ReviewOutcome::Approved {
        apply_venue_changes(&mut tx, venue_id, &changes).await?;
    }

    sqlx::query("UPDATE venues SET is_active = TRUE WHERE id = $1")
        .bind(venue_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("UPDATE venue_pending_changes SET status = $2 WHERE id = $1")
        .bind(change_id)
        .bind(outcome.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

async fn apply_venue_changes(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    venue_id: i64,
    changes: &serde_json::Value,
) -> Result<(), sqlx::Error> {
    let text = |key: &str| -> Option<String> {
        changes.get(key).and_then(|v| v.as_str()).map(String::from)
    };
    let number = |key: &str| -> Option<f64> { changes.get(key).and_then(|v| v.as_f64()) };
    let features: Option<Vec<String>> = changes.get("features").and_then(|v| v.as_array()).map(|a| {
        a.iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()
    });

    sqlx::query(
        r#"
        UPDATE venues SET
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            business_type = COALESCE($4, business_type),
            features = COALESCE($5, features),
            address = COALESCE($6, address),
            city = COALESCE($7, city),
            postcode = COALESCE($8, postcode),
            lat = COALESCE($9, lat),
            long = COALESCE($10, long),
            website = COALESCE($11, website),
            phone = COALESCE($12, phone),
            logo_url = COALESCE($13, logo_url)
        WHERE id = $1
        "#,
    )
    .bind(venue_id)
    .bind(text("name"))
    .bind(text("description"))
    .bind(text("business_type"))
    .bind(features)
    .bind(text("address"))
    .bind(text("city"))
    .bind(text("postcode"))
    .bind(number("lat"))
    .bind(number("long"))
    .bind(text("website"))
    .bind(text("phone"))
    .bind(text("logo_url"))
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn list_unapproved_reviews() -> Result<Vec<VenueReview>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT r.id, r.venue_id, r.author_id, p.display_name AS author_name,
               r.rating, r.body, r.is_approved, r.created_at::text AS created_at
        FROM venue_reviews r
        JOIN profiles p ON p.user_id = r.author_id
        WHERE NOT r.is_approved
        ORDER BY r.created_at ASC
        "#,
    )
    .fetch_all(get_pool())
    .await?;

    rows.iter()
        .map(|row| {
            Ok(VenueReview {
                id: row.try_get("id")?,
                venue_id: row.try_get("venue_id")?,
                author_id: row.try_get("author_id")?,
                author_name: row.try_get("author_name")?,
                rating: row.try_get("rating")?,
                body: row.try_get("body")?,
                is_approved: row.try_get("is_approved")?,
                created_at: row.try_get("created_at")?,
                replies: Vec::new(),
            })
        })
        .collect()
}

pub async fn approve_review(review_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE venue_reviews SET is_approved = TRUE WHERE id = $1")
        .bind(review_id)
        .execute(get_pool())
        .await?;
    Ok(())
}

pub async fn delete_review(review_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM venue_reviews WHERE id = $1")
        .bind(review_id)
        .execute(get_pool())
        .await?;
    Ok(())
}

/// Owners may only reply to reviews on venues they own.
pub async fn insert_review_reply(
    review_id: i64,
    owner_id: i64,
    body: &str,
) -> Result<i64, ModerationError> {
    let owns_venue = sqlx::query(
        r#"
        SELECT 1
        FROM venue_reviews r
        JOIN venues v ON v.id = r.venue_id
        WHERE r.id = $1 AND v.owner_id = $2
        "#,
    )
    .bind(review_id)
    .bind(owner_id)
    .fetch_optional(get_pool())
    .await?
    .is_some();
    if !owns_venue {
        return Err(ModerationError::NotFound);
    }

    let row = sqlx::query(
        "INSERT INTO review_replies (review_id, owner_id, body) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(review_id)
    .bind(owner_id)
    .bind(body)
    .fetch_one(get_pool())
    .await?;
    Ok(row.try_get("id")?)
}

fn sponsor_application_from_row(row: &PgRow) -> Result<SponsorApplication, sqlx::Error> {
    Ok(SponsorApplication {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        contact_email: row.try_get("contact_email")?,
        website: row.try_get("website")?,
        message: row.try_get("message")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
    })
}

pub async fn insert_sponsor_application(
    name: &str,
    contact_email: &str,
    website: Option<&str>,
    message: &str,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO sponsor_applications (name, contact_email, website, message, status)
        VALUES ($1, $2, $3, $4, 'pending')
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(contact_email)
    .bind(website)
    .bind(message)
    .fetch_one(get_pool())
    .await?;
    row.try_get("id")
}

pub async fn list_pending_sponsor_applications() -> Result<Vec<SponsorApplication>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, contact_email, website, message, status,
               created_at::text AS created_at
        FROM sponsor_applications
        WHERE status = 'pending'
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(get_pool())
    .await?;
    rows.iter().map(sponsor_application_from_row).collect()
}

/// Approval creates the active sponsor row in the same transaction.
pub async fn resolve_sponsor_application(
    application_id: i64,
    outcome: ReviewOutcome,
) -> Result<(), ModerationError> {
    let mut tx = get_pool().begin().await?;

    let row = sqlx::query(
        "SELECT name, website, status FROM sponsor_applications WHERE id = $1 FOR UPDATE",
    )
    .bind(application_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(ModerationError::NotFound)?;

    let current: String = row.try_get("status")?;
    let current = ReviewOutcome::parse(&current)
        .ok_or_else(|| ModerationError::UnknownStatus(current.clone()))?;
    if !current.can_transition_to(outcome) {
        return Err(ModerationError::IllegalTransition {
            from: current.as_str().to_string(),
            to: outcome.as_str().to_string(),
        });
    }

    if outcome == ReviewOutcome::Approved {
        let name: String = row.try_get("name")?;
        let website: Option<String> = row.try_get("website")?;
        sqlx::query("INSERT INTO sponsors (name, website, is_active) VALUES ($1, $2, TRUE)")
            .bind(&name)
            .bind(&website)
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query("UPDATE sponsor_applications SET status = $2 WHERE id = $1")
        .bind(application_id)
        .bind(outcome.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Published venues belonging to an owner, active or not.
pub async fn list_venues_for_owner(
    owner_id: i64,
) -> Result<Vec<super::entities::Venue>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, slug, name, description, business_type, features, address, city,
               postcode, lat, long, website, phone, logo_url, owner_id, is_active,
               created_at::text AS created_at
        FROM venues
        WHERE owner_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(owner_id)
    .fetch_all(get_pool())
    .await?;

    rows.iter()
        .map(|row| {
            Ok(super::entities::Venue {
                id: row.try_get("id")?,
                slug: row.try_get("slug")?,
                name: row.try_get("name")?,
                description: row.try_get("description")?,
                business_type: row.try_get("business_type")?,
                features: row.try_get("features")?,
                address: row.try_get("address")?,
                city: row.try_get("city")?,
                postcode: row.try_get("postcode")?,
                lat: row.try_get("lat")?,
                long: row.try_get("long")?,
                website: row.try_get("website")?,
                phone: row.try_get("phone")?,
                logo_url: row.try_get("logo_url")?,
                owner_id: row.try_get("owner_id")?,
                is_active: row.try_get("is_active")?,
                created_at: row.try_get("created_at")?,
            })
        })
        .collect()
}

/// Reviews (approved only) across all venues an owner holds, for the
/// dashboard reply screen.
pub async fn list_reviews_for_owner(owner_id: i64) -> Result<Vec<VenueReview>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT r.id, r.venue_id, r.author_id, p.display_name AS author_name,
               r.rating, r.body, r.is_approved, r.created_at::text AS created_at
        FROM venue_reviews r
        JOIN venues v ON v.id = r.venue_id
        JOIN profiles p ON p.user_id = r.author_id
        WHERE v.owner_id = $1 AND r.is_approved
        ORDER BY r.created_at DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(get_pool())
    .await?;

    rows.iter()
        .map(|row| {
            Ok(VenueReview {
                id: row.try_get("id")?,
                venue_id: row.try_get("venue_id")?,
                author_id: row.try_get("author_id")?,
                author_name: row.try_get("author_name")?,
                rating: row.try_get("rating")?,
                body: row.try_get("body")?,
                is_approved: row.try_get("is_approved")?,
                created_at: row.try_get("created_at")?,
                replies: Vec::new(),
            })
        })
        .collect()
}
