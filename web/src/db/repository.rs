//! Public read path plus review submission. Everything here only ever sees
//! published, active venues and approved reviews; moderation lives in
//! `moderation_repository`.

use shared_types::VenueSummary;
use sqlx::postgres::PgRow;
use sqlx::Row;

use super::entities::{ReviewReply, Sponsor, VenueReview};
use super::pool::get_pool;

const VENUE_SUMMARY_QUERY: &str = r#"
    SELECT
        v.id,
        v.slug,
        v.name,
        v.description,
        v.business_type,
        v.features,
        v.address,
        v.city,
        v.postcode,
        v.lat,
        v.long,
        v.website,
        v.phone,
        v.logo_url,
        AVG(r.rating) FILTER (WHERE r.is_approved)::float8 AS average_rating,
        COUNT(r.id) FILTER (WHERE r.is_approved) AS review_count
    FROM venues v
    LEFT JOIN venue_reviews r ON r.venue_id = v.id
    WHERE v.is_active
    GROUP BY v.id
"#;

fn venue_summary_from_row(row: &PgRow) -> Result<VenueSummary, sqlx::Error> {
    Ok(VenueSummary {
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
        average_rating: row.try_get("average_rating")?,
        review_count: row.try_get("review_count")?,
    })
}

pub async fn list_published_venues() -> Result<Vec<VenueSummary>, sqlx::Error> {
    let rows = sqlx::query(&format!("{VENUE_SUMMARY_QUERY} ORDER BY v.name ASC"))
        .fetch_all(get_pool())
        .await?;
    rows.iter().map(venue_summary_from_row).collect()
}

pub async fn get_venue_by_slug(slug: &str) -> Result<Option<VenueSummary>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT * FROM ({VENUE_SUMMARY_QUERY}) s WHERE s.slug = $1"
    ))
    .bind(slug)
    .fetch_optional(get_pool())
    .await?;
    row.as_ref().map(venue_summary_from_row).transpose()
}

/// Approved reviews for a venue, newest first, with owner replies attached.
pub async fn list_approved_reviews(venue_id: i64) -> Result<Vec<VenueReview>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT r.id, r.venue_id, r.author_id, p.display_name AS author_name,
               r.rating, r.body, r.is_approved, r.created_at::text AS created_at
        FROM venue_reviews r
        JOIN profiles p ON p.user_id = r.author_id
        WHERE r.venue_id = $1 AND r.is_approved
        ORDER BY r.created_at DESC
        "#,
    )
    .bind(venue_id)
    .fetch_all(get_pool())
    .await?;

    let mut reviews = Vec::with_capacity(rows.len());
    for row in &rows {
        reviews.push(VenueReview {
            id: row.try_get("id")?,
            venue_id: row.try_get("venue_id")?,
            author_id: row.try_get("author_id")?,
            author_name: row.try_get("author_name")?,
            rating: row.try_get("rating")?,
            body: row.try_get("body")?,
            is_approved: row.try_get("is_approved")?,
            created_at: row.try_get("created_at")?,
            replies: Vec::new(),
        });
    }

    for review in &mut reviews {
        review.replies = list_replies(review.id).await?;
    }

    Ok(reviews)
}

async fn list_replies(review_id: i64) -> Result<Vec<ReviewReply>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, review_id, owner_id, body, created_at::text AS created_at
        FROM review_replies
        WHERE review_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(review_id)
    .fetch_all(get_pool())
    .await?;

    rows.iter()
        .map(|row| {
            Ok(ReviewReply {
                id: row.try_get("id")?,
                review_id: row.try_get("review_id")?,
                owner_id: row.try_get("owner_id")?,
                body: row.try_get("body")?,
                created_at: row.try_get("created_at")?,
            })
        })
        .collect()
}

/// Inserts a review awaiting moderation. Never visible publicly until an
/// admin approves it.
pub async fn insert_review(
    venue_id: i64,
    author_id: i64,
    rating: i32,
    body: &str,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO venue_reviews (venue_id, author_id, rating, body, is_approved)
        VALUES ($1, $2, $3, $4, FALSE)
        RETURNING id
        "#,
    )
    .bind(venue_id)
    .bind(author_id)
    .bind(rating)
    .bind(body)
    .fetch_one(get_pool())
    .await?;
    row.try_get("id")
}

pub async fn list_active_sponsors() -> Result<Vec<Sponsor>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT id, name, website, logo_url, is_active FROM sponsors WHERE is_active ORDER BY name",
    )
    .fetch_all(get_pool())
    .await?;

    rows.iter()
        .map(|row| {
            Ok(Sponsor {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                website: row.try_get("website")?,
                logo_url: row.try_get("logo_url")?,
                is_active: row.try_get("is_active")?,
            })
        })
        .collect()
}

pub struct DirectoryStats {
    pub venue_count: i64,
    pub review_count: i64,
    pub city_count: i64,
}

pub async fn directory_stats() -> Result<DirectoryStats, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT
            (SELECT COUNT(*) FROM venues WHERE is_active) AS venue_count,
            (SELECT COUNT(*) FROM venue_reviews WHERE is_approved) AS review_count,
            (SELECT COUNT(DISTINCT city) FROM venues WHERE is_active) AS city_count
        "#,
    )
    .fetch_one(get_pool())
    .await?;

    Ok(DirectoryStats {
        venue_count: row.try_get("venue_count")?,
        review_count: row.try_get("review_count")?,
        city_count: row.try_get("city_count")?,
    })
}
