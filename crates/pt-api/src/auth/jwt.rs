use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::Environment, error::ApiError};

/// Name of the cookie carrying the JWT
pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id as string
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

/// Generate a JWT token for a user
pub fn generate_jwt_token(
    user_id: Uuid,
    email: String,
    jwt_secret: &str,
    expiry_hours: i64,
) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email,
        iat: now.timestamp() as usize,
        exp: (now + chrono::Duration::hours(expiry_hours)).timestamp() as usize,
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify and decode a JWT token
pub fn verify_jwt_token(token: &str, jwt_secret: &str) -> Result<Claims, ApiError> {
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Auth("Invalid or expired token".to_string()))?;

    Ok(token_data.claims)
}

/// Create the auth cookie carrying the JWT token.
///
/// Secure (HTTPS-only) outside development so the token never travels in
/// the clear in production.
pub fn create_auth_cookie(
    token: String,
    environment: &Environment,
    expiry_hours: i64,
) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .max_age(time::Duration::hours(expiry_hours))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(!environment.is_development())
        .build()
}

/// Cookie used to remove the auth cookie on logout.
///
/// Path must match the original cookie or browsers keep the stale one.
pub fn removal_auth_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_jwt_secret_minimum_32_characters_long";

    #[test]
    fn test_generate_and_verify_jwt_token() {
        let user_id = Uuid::new_v4();
        let email = "test@example.com".to_string();

        let token = generate_jwt_token(user_id, email.clone(), SECRET, 24)
            .expect("Failed to generate token");

        assert!(!token.is_empty(), "Token should not be empty");

        let claims = verify_jwt_token(&token, SECRET).expect("Failed to verify token");

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, email);
        assert!(
            claims.exp > claims.iat,
            "Expiration should be after issued at"
        );
    }

    #[test]
    fn test_verify_jwt_token_with_wrong_secret() {
        let token = generate_jwt_token(Uuid::new_v4(), "test@example.com".to_string(), SECRET, 24)
            .expect("Failed to generate token");

        let result = verify_jwt_token(&token, "wrong_jwt_secret_minimum_32_characters_long");

        match result {
            Err(ApiError::Auth(msg)) => {
                assert!(msg.contains("Invalid or expired token"));
            }
            _ => panic!("Expected Auth error"),
        }
    }

    #[test]
    fn test_verify_invalid_jwt_token() {
        let result = verify_jwt_token("invalid.jwt.token", SECRET);

        match result {
            Err(ApiError::Auth(msg)) => {
                assert!(msg.contains("Invalid or expired token"));
            }
            _ => panic!("Expected Auth error"),
        }
    }

    #[test]
    fn test_jwt_token_expiration_matches_requested_hours() {
        let token = generate_jwt_token(Uuid::new_v4(), "test@example.com".to_string(), SECRET, 24)
            .expect("Failed to generate token");

        let claims = verify_jwt_token(&token, SECRET).expect("Failed to verify token");

        // ~24 hours (86400 seconds), with a little slack for clock reads
        let expiration_duration = claims.exp - claims.iat;
        assert!(
            (86390..=86410).contains(&expiration_duration),
            "Token should expire in approximately 24 hours, got {} seconds",
            expiration_duration
        );
    }

    #[test]
    fn test_create_auth_cookie_development() {
        let cookie = create_auth_cookie("token".to_string(), &Environment::Development, 24);

        assert_eq!(cookie.name(), AUTH_COOKIE);
        assert_eq!(cookie.value(), "token");
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.http_only().unwrap_or(false));
        assert!(
            !cookie.secure().unwrap_or(true),
            "Should not be secure in development"
        );
    }

    #[test]
    fn test_create_auth_cookie_production() {
        let cookie = create_auth_cookie("token".to_string(), &Environment::Production, 24);

        assert_eq!(cookie.name(), AUTH_COOKIE);
        assert!(cookie.http_only().unwrap_or(false));
        assert!(
            cookie.secure().unwrap_or(false),
            "Should be secure in production"
        );
    }
}
