//! Payment handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use core_kernel::{ClaimId, PaymentId, PolicyId};
use domain_billing::{NewPayment, Payment, PaymentPatch};

use crate::dto::{ListQuery, ProcessPaymentRequest};
use crate::error::ApiError;
use crate::AppState;

pub async fn create_payment(
    State(state): State<AppState>,
    Json(new): Json<NewPayment>,
) -> Result<(StatusCode, Json<Payment>), ApiError> {
    let payment = state.payments.create(new).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// Filters by `claim_id`, then `policy_id`, then `client_id`
pub async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Payment>>, ApiError> {
    let page = query.pagination()?;
    let payments = if let Some(claim_id) = query.claim_id {
        state.payments.get_by_claim_id(claim_id, page).await?
    } else if let Some(policy_id) = query.policy_id {
        state.payments.get_by_policy_id(policy_id, page).await?
    } else if let Some(client_id) = query.client_id {
        state.payments.get_by_client_id(client_id, page).await?
    } else {
        state.payments.list(page).await?
    };
    Ok(Json(payments))
}

pub async fn get_payment_by_number(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<Payment>, ApiError> {
    Ok(Json(state.payments.get_by_payment_number(&number).await?))
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<PaymentId>,
) -> Result<Json<Payment>, ApiError> {
    Ok(Json(state.payments.get(id).await?))
}

pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<PaymentId>,
    Json(patch): Json<PaymentPatch>,
) -> Result<Json<Payment>, ApiError> {
    Ok(Json(state.payments.update(id, patch).await?))
}

/// Marks a payment completed; the body may be omitted
pub async fn process_payment(
    State(state): State<AppState>,
    Path(id): Path<PaymentId>,
    body: Option<Json<ProcessPaymentRequest>>,
) -> Result<Json<Payment>, ApiError> {
    let payment_date = body.and_then(|Json(req)| req.payment_date);
    Ok(Json(state.payments.process_payment(id, payment_date).await?))
}

pub async fn create_premium_payment(
    State(state): State<AppState>,
    Path(policy_id): Path<PolicyId>,
) -> Result<(StatusCode, Json<Payment>), ApiError> {
    let payment = state.payments.create_premium_payment(policy_id).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn create_claim_payout(
    State(state): State<AppState>,
    Path(claim_id): Path<ClaimId>,
) -> Result<(StatusCode, Json<Payment>), ApiError> {
    let payment = state.payments.create_claim_payout(claim_id).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<PaymentId>,
) -> Result<StatusCode, ApiError> {
    state.payments.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
