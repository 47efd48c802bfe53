//! User account handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::UserId;
use domain_user::{User, UserPatch};

use crate::auth::Claims;
use crate::dto::{ChangePasswordRequest, ListQuery, UpdateRolesRequest};
use crate::error::ApiError;
use crate::AppState;

fn caller_id(claims: &Claims) -> Result<UserId, ApiError> {
    claims
        .sub
        .parse()
        .map_err(|_| ApiError::Unauthorized("Invalid token subject".to_string()))
}

/// The authenticated user
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<User>, ApiError> {
    let user = state.users.get_user(caller_id(&claims)?).await?;
    Ok(Json(user))
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    req.validate()?;
    state
        .users
        .change_password(caller_id(&claims)?, &req.current_password, &req.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.users.list(query.pagination()?).await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.get_user(id).await?))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.update_user(id, patch).await?))
}

pub async fn update_roles(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(req): Json<UpdateRolesRequest>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.update_roles(id, req.roles).await?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<StatusCode, ApiError> {
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
