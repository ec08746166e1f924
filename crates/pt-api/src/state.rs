use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::PgPool;

use crate::config::{ApiConfig, Environment};

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct ApiState {
    pub pool: PgPool,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub frontend_url: String,
    pub cookie_key: Key,
    pub environment: Environment,
}

impl ApiState {
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        // Key::from panics below 64 bytes of key material, so a short
        // COOKIE_SECRET fails fast at startup rather than per request.
        let cookie_key = Key::from(config.cookie_secret.as_bytes());

        Self {
            pool,
            jwt_secret: config.jwt_secret,
            jwt_expiry_hours: config.jwt_expiry_hours,
            frontend_url: config.frontend_url,
            cookie_key,
            environment: config.env,
        }
    }
}

impl FromRef<ApiState> for Key {
    fn from_ref(state: &ApiState) -> Self {
        state.cookie_key.clone()
    }
}

/// The slice of state the auth extractor needs.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

impl FromRef<ApiState> for AuthConfig {
    fn from_ref(state: &ApiState) -> Self {
        Self {
            jwt_secret: state.jwt_secret.clone(),
        }
    }
}
