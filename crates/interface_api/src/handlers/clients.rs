//! Client handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use core_kernel::ClientId;
use domain_client::{Client, ClientPatch, NewClient};

use crate::dto::{ListQuery, SearchQuery};
use crate::error::ApiError;
use crate::AppState;

pub async fn create_client(
    State(state): State<AppState>,
    Json(new): Json<NewClient>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    let client = state.clients.register(new).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Client>>, ApiError> {
    Ok(Json(state.clients.list(query.pagination()?).await?))
}

pub async fn search_clients(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Client>>, ApiError> {
    let page = query.pagination()?;
    Ok(Json(state.clients.search_by_name(&query.name, page).await?))
}

pub async fn get_client_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Client>, ApiError> {
    Ok(Json(state.clients.get_by_email(&email).await?))
}

pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
) -> Result<Json<Client>, ApiError> {
    Ok(Json(state.clients.get(id).await?))
}

pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
    Json(patch): Json<ClientPatch>,
) -> Result<Json<Client>, ApiError> {
    Ok(Json(state.clients.update(id, patch).await?))
}

pub async fn deactivate_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
) -> Result<Json<Client>, ApiError> {
    Ok(Json(state.clients.deactivate(id).await?))
}

pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
) -> Result<StatusCode, ApiError> {
    state.clients.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
