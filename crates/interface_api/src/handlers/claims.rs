//! Claim lifecycle handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimPatch, NewClaim};

use crate::dto::{ApproveClaimRequest, ListQuery, UpdateClaimStatusRequest};
use crate::error::ApiError;
use crate::AppState;

/// Files a claim against an active policy
pub async fn create_claim(
    State(state): State<AppState>,
    Json(new): Json<NewClaim>,
) -> Result<(StatusCode, Json<Claim>), ApiError> {
    let claim = state.claims.create(new).await?;
    Ok((StatusCode::CREATED, Json(claim)))
}

/// Filters by `policy_id` first, then `client_id`
pub async fn list_claims(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Claim>>, ApiError> {
    let page = query.pagination()?;
    let claims = match (query.policy_id, query.client_id) {
        (Some(policy_id), _) => state.claims.get_by_policy_id(policy_id, page).await?,
        (None, Some(client_id)) => state.claims.get_by_client_id(client_id, page).await?,
        (None, None) => state.claims.list(page).await?,
    };
    Ok(Json(claims))
}

pub async fn get_claim_by_number(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<Claim>, ApiError> {
    Ok(Json(state.claims.get_by_claim_number(&number).await?))
}

pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
) -> Result<Json<Claim>, ApiError> {
    Ok(Json(state.claims.get(id).await?))
}

pub async fn update_claim(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
    Json(patch): Json<ClaimPatch>,
) -> Result<Json<Claim>, ApiError> {
    Ok(Json(state.claims.update(id, patch).await?))
}

pub async fn update_claim_status(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
    Json(req): Json<UpdateClaimStatusRequest>,
) -> Result<Json<Claim>, ApiError> {
    Ok(Json(state.claims.update_status(id, req.status).await?))
}

pub async fn approve_claim(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
    Json(req): Json<ApproveClaimRequest>,
) -> Result<Json<Claim>, ApiError> {
    Ok(Json(state.claims.approve_claim(id, req.approved_amount).await?))
}

pub async fn delete_claim(
    State(state): State<AppState>,
    Path(id): Path<ClaimId>,
) -> Result<StatusCode, ApiError> {
    state.claims.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
