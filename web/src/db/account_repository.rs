//! Accounts, profiles, roles and data-rights requests.

use sqlx::Row;

use super::entities::{DataRightsRequest, Profile, UserAccount};
use super::pool::get_pool;

pub struct AccountCredentials {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

pub async fn find_account_by_email(
    email: &str,
) -> Result<Option<AccountCredentials>, sqlx::Error> {
    let row = sqlx::query(
        "SELECT id, email, password_hash, role FROM user_accounts WHERE lower(email) = lower($1)",
    )
    .bind(email)
    .fetch_optional(get_pool())
    .await?;

    row.map(|row| {
        Ok(AccountCredentials {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            role: row.try_get("role")?,
        })
    })
    .transpose()
}

/// Creates the account and its profile row together.
pub async fn create_account(
    email: &str,
    password_hash: &str,
    display_name: &str,
    pronouns: Option<&str>,
    role: &str,
) -> Result<i64, sqlx::Error> {
    let mut tx = get_pool().begin().await?;

    let row = sqlx::query(
        r#"
        INSERT INTO user_accounts (email, password_hash, role)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(&mut *tx)
    .await?;
    let user_id: i64 = row.try_get("id")?;

    sqlx::query(
        "INSERT INTO profiles (user_id, display_name, pronouns, email) VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind(display_name)
    .bind(pronouns)
    .bind(email)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(user_id)
}

/// Account email and profile email stay in sync; both change in one
/// transaction.
pub async fn update_account_email(user_id: i64, new_email: &str) -> Result<(), sqlx::Error> {
    let mut tx = get_pool().begin().await?;
    sqlx::query("UPDATE user_accounts SET email = $2 WHERE id = $1")
        .bind(user_id)
        .bind(new_email)
        .execute(&mut *tx)
        .await?;
    sqlx::query("UPDATE profiles SET email = $2 WHERE user_id = $1")
        .bind(user_id)
        .bind(new_email)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(())
}

pub async fn get_profile(user_id: i64) -> Result<Option<Profile>, sqlx::Error> {
    let row = sqlx::query(
        "SELECT user_id, display_name, pronouns, email FROM profiles WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(get_pool())
    .await?;

    row.map(|row| {
        Ok(Profile {
            user_id: row.try_get("user_id")?,
            display_name: row.try_get("display_name")?,
            pronouns: row.try_get("pronouns")?,
            email: row.try_get("email")?,
        })
    })
    .transpose()
}

pub async fn update_profile(
    user_id: i64,
    display_name: &str,
    pronouns: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE profiles SET display_name = $2, pronouns = $3 WHERE user_id = $1")
        .bind(user_id)
        .bind(display_name)
        .bind(pronouns)
        .execute(get_pool())
        .await?;
    Ok(())
}

pub async fn list_accounts() -> Result<Vec<UserAccount>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT id, email, role, created_at::text AS created_at FROM user_accounts ORDER BY created_at ASC",
    )
    .fetch_all(get_pool())
    .await?;

    rows.iter()
        .map(|row| {
            Ok(UserAccount {
                id: row.try_get("id")?,
                email: row.try_get("email")?,
                role: row.try_get("role")?,
                created_at: row.try_get("created_at")?,
            })
        })
        .collect()
}

pub async fn set_account_role(user_id: i64, role: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE user_accounts SET role = $2 WHERE id = $1")
        .bind(user_id)
        .bind(role)
        .execute(get_pool())
        .await?;
    Ok(())
}

pub async fn get_account_email(user_id: i64) -> Result<Option<String>, sqlx::Error> {
    let row = sqlx::query("SELECT email FROM user_accounts WHERE id = $1")
        .bind(user_id)
        .fetch_optional(get_pool())
        .await?;
    row.map(|row| row.try_get("email")).transpose()
}

pub async fn insert_data_rights_request(user_id: i64, kind: &str) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO data_rights_requests (user_id, kind, status)
        VALUES ($1, $2, 'pending')
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(kind)
    .fetch_one(get_pool())
    .await?;
    row.try_get("id")
}

pub async fn list_data_rights_requests() -> Result<Vec<DataRightsRequest>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT r.id, r.user_id, a.email AS user_email, r.kind, r.status,
               r.created_at::text AS created_at
        FROM data_rights_requests r
        JOIN user_accounts a ON a.id = r.user_id
        WHERE r.status = 'pending'
        ORDER BY r.created_at ASC
        "#,
    )
    .fetch_all(get_pool())
    .await?;

    rows.iter()
        .map(|row| {
            Ok(DataRightsRequest {
                id: row.try_get("id")?,
                user_id: row.try_get("user_id")?,
                user_email: row.try_get("user_email")?,
                kind: row.try_get("kind")?,
                status: row.try_get("status")?,
                created_at: row.try_get("created_at")?,
            })
        })
        .collect()
}

pub async fn complete_data_rights_request(request_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE data_rights_requests SET status = 'completed' WHERE id = $1")
        .bind(request_id)
        .execute(get_pool())
        .await?;
    Ok(())
}
