use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::extract::PrivateCookieJar;

use pt_db::repositories::user;

use super::jwt::{create_auth_cookie, generate_jwt_token, removal_auth_cookie};
use super::models::{LoginRequest, RegisterRequest, UserResponse};
use crate::{ApiState, auth::AuthUser, error::ApiError, metrics};

/// Create the auth routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

async fn register(
    State(state): State<ApiState>,
    jar: PrivateCookieJar,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, PrivateCookieJar, Json<UserResponse>), ApiError> {
    if !payload.email.contains('@') {
        return Err(ApiError::InvalidArgument(
            "Invalid email address".to_string(),
        ));
    }
    if payload.username.trim().is_empty() {
        return Err(ApiError::InvalidArgument(
            "Username cannot be empty".to_string(),
        ));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::InvalidArgument(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)?;

    let user = match user::insert(&state.pool, &payload.email, &payload.username, &password_hash)
        .await
    {
        Ok(user) => user,
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            metrics::record_auth_event("register", false);
            return Err(ApiError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    metrics::record_auth_event("register", true);
    tracing::info!(user_id = %user.id, "user registered");

    let token = generate_jwt_token(
        user.id,
        user.email.clone(),
        &state.jwt_secret,
        state.jwt_expiry_hours,
    )?;
    let jar = jar.add(create_auth_cookie(
        token,
        &state.environment,
        state.jwt_expiry_hours,
    ));

    Ok((StatusCode::CREATED, jar, Json(user.into())))
}

async fn login(
    State(state): State<ApiState>,
    jar: PrivateCookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(PrivateCookieJar, Json<UserResponse>), ApiError> {
    // One error message for both unknown email and wrong password, so the
    // endpoint cannot be used to enumerate accounts.
    let user = user::find_by_email(&state.pool, &payload.email)
        .await?
        .ok_or_else(|| {
            metrics::record_auth_event("login", false);
            ApiError::Auth("Invalid email or password".to_string())
        })?;

    let password_matches = bcrypt::verify(&payload.password, &user.password_hash)?;
    if !password_matches {
        metrics::record_auth_event("login", false);
        return Err(ApiError::Auth("Invalid email or password".to_string()));
    }

    metrics::record_auth_event("login", true);

    let token = generate_jwt_token(
        user.id,
        user.email.clone(),
        &state.jwt_secret,
        state.jwt_expiry_hours,
    )?;
    let jar = jar.add(create_auth_cookie(
        token,
        &state.environment,
        state.jwt_expiry_hours,
    ));

    Ok((jar, Json(user.into())))
}

async fn logout(jar: PrivateCookieJar) -> (PrivateCookieJar, StatusCode) {
    (jar.remove(removal_auth_cookie()), StatusCode::NO_CONTENT)
}

async fn me(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = user::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::Auth("User no longer exists".to_string()))?;

    Ok(Json(user.into()))
}
