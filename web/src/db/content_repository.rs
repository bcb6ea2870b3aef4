//! Editable content pages and site settings.

use sqlx::Row;

use super::entities::{ContentPage, SiteSetting};
use super::pool::get_pool;

pub async fn get_content_page(slug: &str) -> Result<Option<ContentPage>, sqlx::Error> {
    let row = sqlx::query("SELECT slug, title, body FROM content_pages WHERE slug = $1")
        .bind(slug)
        .fetch_optional(get_pool())
        .await?;

    row.map(|row| {
        Ok(ContentPage {
            slug: row.try_get("slug")?,
            title: row.try_get("title")?,
            body: row.try_get("body")?,
        })
    })
    .transpose()
}

pub async fn upsert_content_page(slug: &str, title: &str, body: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO content_pages (slug, title, body)
        VALUES ($1, $2, $3)
        ON CONFLICT (slug) DO UPDATE SET title = EXCLUDED.title, body = EXCLUDED.body
        "#,
    )
    .bind(slug)
    .bind(title)
    .bind(body)
    .execute(get_pool())
    .await?;
    Ok(())
}

pub async fn get_site_setting(key: &str) -> Result<Option<String>, sqlx::Error> {
    let row = sqlx::query("SELECT value FROM site_settings WHERE key = $1")
        .bind(key)
        .fetch_optional(get_pool())
        .await?;
    row.map(|row| row.try_get("value")).transpose()
}

pub async fn list_site_settings() -> Result<Vec<SiteSetting>, sqlx::Error> {
    let rows = sqlx::query("SELECT key, value FROM site_settings ORDER BY key")
        .fetch_all(get_pool())
        .await?;

    rows.iter()
        .map(|row| {
            Ok(SiteSetting {
                key: row.try_get("key")?,
                value: row.try_get("value")?,
            })
        })
        .collect()
}

pub async fn upsert_site_setting(key: &str, value: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO site_settings (key, value)
        VALUES ($1, $2)
        ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(get_pool())
    .await?;
    Ok(())
}
