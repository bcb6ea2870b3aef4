//! Server-side session tokens. Seven-day JWTs signed with a secret from the
//! environment; every authorized server function verifies the token and
//! checks the role before touching the database.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub user_id: i64,
    pub role: String,
}

const TOKEN_LIFETIME_DAYS: i64 = 7;

fn secret() -> Vec<u8> {
    std::env::var("HAVENMAP_JWT_SECRET")
        .unwrap_or_else(|_| "havenmap-dev-secret".to_string())
        .into_bytes()
}

pub fn issue_token(user_id: i64, email: &str, role: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (chrono::Utc::now() + chrono::Duration::days(TOKEN_LIFETIME_DAYS)).timestamp() as usize;
    let claims = Claims {
        sub: email.to_string(),
        exp,
        user_id,
        role: role.to_string(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(&secret()))
}

pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&secret()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Verifies the token and requires the admin role.
pub fn require_admin(token: &str) -> Result<Claims, String> {
    let claims = verify_token(token).map_err(|_| "Not authorized".to_string())?;
    if claims.role != "admin" {
        return Err("Not authorized".to_string());
    }
    Ok(claims)
}

/// Verifies the token and requires the owner role. Admins pass too.
pub fn require_owner(token: &str) -> Result<Claims, String> {
    let claims = verify_token(token).map_err(|_| "Not authorized".to_string())?;
    if claims.role != "owner" && claims.role != "admin" {
        return Err("Not authorized".to_string());
    }
    Ok(claims)
}

/// Verifies the token for any signed-in account.
pub fn require_user(token: &str) -> Result<Claims, String> {
    verify_token(token).map_err(|_| "Not authorized".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_round_trip() {
        let token = issue_token(42, "sam@example.org", "owner").unwrap();
        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.sub, "sam@example.org");
        assert_eq!(claims.role, "owner");
    }

    #[test]
    fn garbage_tokens_fail() {
        assert!(verify_token("not-a-token").is_err());
    }

    #[test]
    fn role_gates() {
        let user = issue_token(1, "a@example.org", "user").unwrap();
        let owner = issue_token(2, "b@example.org", "owner").unwrap();
        let admin = issue_token(3, "c@example.org", "admin").unwrap();

        assert!(require_admin(&user).is_err());
        assert!(require_admin(&owner).is_err());
        assert!(require_admin(&admin).is_ok());

        assert!(require_owner(&user).is_err());
        assert!(require_owner(&owner).is_ok());
        assert!(require_owner(&admin).is_ok());

        assert!(require_user(&user).is_ok());
    }
}
