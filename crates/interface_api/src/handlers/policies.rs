//! Policy handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use core_kernel::PolicyId;
use domain_policy::{NewPolicy, Policy, PolicyPatch};

use crate::dto::{CalculatePremiumRequest, ListQuery, PremiumQuoteResponse};
use crate::error::ApiError;
use crate::AppState;

pub async fn create_policy(
    State(state): State<AppState>,
    Json(new): Json<NewPolicy>,
) -> Result<(StatusCode, Json<Policy>), ApiError> {
    let policy = state.policies.create(new).await?;
    Ok((StatusCode::CREATED, Json(policy)))
}

/// All policies, or one client's when `client_id` is given
pub async fn list_policies(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Policy>>, ApiError> {
    let page = query.pagination()?;
    let policies = match query.client_id {
        Some(client_id) => state.policies.get_by_client_id(client_id, page).await?,
        None => state.policies.list(page).await?,
    };
    Ok(Json(policies))
}

pub async fn list_active_policies(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Policy>>, ApiError> {
    Ok(Json(state.policies.get_active_policies(query.pagination()?).await?))
}

pub async fn get_policy_by_number(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<Policy>, ApiError> {
    Ok(Json(state.policies.get_by_policy_number(&number).await?))
}

/// Quotes a premium without storing anything
pub async fn calculate_premium(
    State(state): State<AppState>,
    Json(req): Json<CalculatePremiumRequest>,
) -> Result<Json<PremiumQuoteResponse>, ApiError> {
    let premium_amount = state
        .policies
        .quote_premium(req.coverage_amount, req.policy_type)?;
    Ok(Json(PremiumQuoteResponse {
        coverage_amount: req.coverage_amount,
        policy_type: req.policy_type,
        premium_amount,
    }))
}

pub async fn get_policy(
    State(state): State<AppState>,
    Path(id): Path<PolicyId>,
) -> Result<Json<Policy>, ApiError> {
    Ok(Json(state.policies.get(id).await?))
}

pub async fn update_policy(
    State(state): State<AppState>,
    Path(id): Path<PolicyId>,
    Json(patch): Json<PolicyPatch>,
) -> Result<Json<Policy>, ApiError> {
    Ok(Json(state.policies.update(id, patch).await?))
}

pub async fn delete_policy(
    State(state): State<AppState>,
    Path(id): Path<PolicyId>,
) -> Result<StatusCode, ApiError> {
    state.policies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
