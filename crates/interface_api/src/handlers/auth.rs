//! Registration and login

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use domain_user::{NewUser, User};

use crate::auth::create_token;
use crate::dto::{LoginRequest, TokenResponse};
use crate::error::ApiError;
use crate::AppState;

/// Self-registration; duplicate username or email is a 409
pub async fn register(
    State(state): State<AppState>,
    Json(new): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.users.register(new).await.map_err(|e| match ApiError::from(e) {
        ApiError::BadRequest(msg) => ApiError::Conflict(msg),
        other => other,
    })?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchanges username and password for a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .users
        .authenticate(&req.username, &req.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Incorrect username or password".to_string()))?;

    let access_token = create_token(&user, &state.config.jwt_secret, state.config.jwt_expiration_secs)?;
    info!(user = %user.username, "Issued access token");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.config.jwt_expiration_secs,
        user_id: user.id,
        username: user.username,
    }))
}
