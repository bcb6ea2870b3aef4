//! Sign-up, sign-in, profile email sync and data-rights requests.

use leptos::prelude::*;
use leptos::server;
use serde::{Deserialize, Serialize};

use crate::db::entities::Profile;

#[cfg(feature = "ssr")]
use crate::db::account_repository::{
    create_account, find_account_by_email, get_profile, insert_data_rights_request,
    update_account_email, update_profile,
};
#[cfg(feature = "ssr")]
use crate::utils::security::{is_valid_email, password_strength};
#[cfg(feature = "ssr")]
use crate::utils::tokens::{issue_token, require_user};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupData {
    pub display_name: String,
    pub pronouns: Option<String>,
    pub email: String,
    pub password: String,
    /// Owner sign-up happens on its own screen and grants the owner role.
    pub as_owner: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: Option<String>,
    pub role: Option<String>,
    pub error: Option<String>,
}

impl AuthResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self { success: false, token: None, role: None, error: Some(message.into()) }
    }
}

#[server]
pub async fn signup(data: SignupData) -> Result<AuthResponse, ServerFnError> {
    if data.display_name.trim().is_empty() {
        return Ok(AuthResponse::failure("Display name is required"));
    }
    if !is_valid_email(&data.email) {
        return Ok(AuthResponse::failure("That email address doesn't look right"));
    }
    if password_strength(&data.password) < 2 {
        return Ok(AuthResponse::failure(
            "Password is too weak; use at least 8 characters with letters and numbers",
        ));
    }

    match find_account_by_email(&data.email).await {
        Ok(Some(_)) => return Ok(AuthResponse::failure("An account with that email already exists")),
        Ok(None) => {}
        Err(e) => {
            tracing::error!("signup lookup failed: {e}");
            return Err(ServerFnError::new("Sign-up failed, please try again"));
        }
    }

    let hash = bcrypt::hash(&data.password, bcrypt::DEFAULT_COST)
        .map_err(|_| ServerFnError::new("Sign-up failed, please try again"))?;
    let role = if data.as_owner { "owner" } else { "user" };

    let user_id = match create_account(
        data.email.trim(),
        &hash,
        data.display_name.trim(),
        data.pronouns.as_deref().map(str::trim).filter(|p| !p.is_empty()),
        role,
    )
    .await
    {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("signup insert failed: {e}");
            return Err(ServerFnError::new("Sign-up failed, please try again"));
        }
    };

    let token = issue_token(user_id, data.email.trim(), role)
        .map_err(|_| ServerFnError::new("Sign-up failed, please try again"))?;
    Ok(AuthResponse {
        success: true,
        token: Some(token),
        role: Some(role.to_string()),
        error: None,
    })
}

#[server]
pub async fn login(data: LoginData) -> Result<AuthResponse, ServerFnError> {
    let account = match find_account_by_email(&data.email).await {
        Ok(Some(account)) => account,
        Ok(None) => return Ok(AuthResponse::failure("Unknown email or wrong password")),
        Err(e) => {
            tracing::error!("login lookup failed: {e}");
            return Err(ServerFnError::new("Sign-in failed, please try again"));
        }
    };

    let verified = bcrypt::verify(&data.password, &account.password_hash).unwrap_or(false);
    if !verified {
        return Ok(AuthResponse::failure("Unknown email or wrong password"));
    }

    let token = issue_token(account.id, &account.email, &account.role)
        .map_err(|_| ServerFnError::new("Sign-in failed, please try again"))?;
    Ok(AuthResponse {
        success: true,
        token: Some(token),
        role: Some(account.role),
        error: None,
    })
}

#[server]
pub async fn fetch_my_profile(token: String) -> Result<Option<Profile>, ServerFnError> {
    let claims = require_user(&token).map_err(ServerFnError::new)?;
    match get_profile(claims.user_id).await {
        Ok(profile) => Ok(profile),
        Err(e) => {
            tracing::error!("failed to load profile: {e}");
            Err(ServerFnError::new("Failed to load profile"))
        }
    }
}

#[server]
pub async fn update_my_profile(
    token: String,
    display_name: String,
    pronouns: Option<String>,
) -> Result<(), ServerFnError> {
    let claims = require_user(&token).map_err(ServerFnError::new)?;
    if display_name.trim().is_empty() {
        return Err(ServerFnError::new("Display name is required"));
    }
    update_profile(
        claims.user_id,
        display_name.trim(),
        pronouns.as_deref().map(str::trim).filter(|p| !p.is_empty()),
    )
    .await
    .map_err(|e| {
        tracing::error!("failed to update profile: {e}");
        ServerFnError::new("Failed to update profile, please try again")
    })
}

/// Changing the account email rewrites the profile email in the same
/// transaction; the caller must sign in again afterwards because the token
/// carries the old address.
#[server]
pub async fn change_account_email(token: String, new_email: String) -> Result<(), ServerFnError> {
    let claims = require_user(&token).map_err(ServerFnError::new)?;
    if !is_valid_email(&new_email) {
        return Err(ServerFnError::new("That email address doesn't look right"));
    }
    update_account_email(claims.user_id, new_email.trim())
        .await
        .map_err(|e| {
            tracing::error!("failed to change email: {e}");
            ServerFnError::new("Failed to change email, please try again")
        })
}

/// Files an export or delete request for an admin to complete.
#[server]
pub async fn request_data_rights(token: String, kind: String) -> Result<(), ServerFnError> {
    let claims = require_user(&token).map_err(ServerFnError::new)?;
    if kind != "export" && kind != "delete" {
        return Err(ServerFnError::new("Unknown request type"));
    }
    insert_data_rights_request(claims.user_id, &kind)
        .await
        .map(|_| ())
        .map_err(|e| {
            tracing::error!("failed to file data rights request: {e}");
            ServerFnError::new("Failed to file request, please try again")
        })
}
