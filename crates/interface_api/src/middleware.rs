//! Request middleware

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use domain_user::ADMIN_ROLE;

use crate::auth::{has_role, validate_token, AuthError, Claims};
use crate::error::ApiError;
use crate::AppState;

/// Requires a valid Bearer token and stores its claims in the request extensions
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return ApiError::from(AuthError::MissingCredentials).into_response();
    };

    match validate_token(token, &state.config.jwt_secret) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            warn!(error = %e, "Rejected bearer token");
            ApiError::from(e).into_response()
        }
    }
}

/// Lets only admins and superusers through; runs after `auth_middleware`
pub async fn admin_guard(request: Request, next: Next) -> Response {
    let denied = match request.extensions().get::<Claims>() {
        Some(claims) if has_role(claims, ADMIN_ROLE) => None,
        Some(claims) => Some(claims.username.clone()),
        None => return ApiError::from(AuthError::MissingCredentials).into_response(),
    };

    match denied {
        None => next.run(request).await,
        Some(username) => {
            warn!(user = %username, uri = %request.uri(), "Admin route denied");
            ApiError::Forbidden("Not enough permissions".to_string()).into_response()
        }
    }
}

/// Logs every request with its caller, status and duration
pub async fn audit_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user = request
        .extensions()
        .get::<Claims>()
        .map(|c| c.username.clone())
        .unwrap_or_else(|| "anonymous".to_string());

    let response = next.run(request).await;

    info!(
        method = %method,
        uri = %uri,
        user = %user,
        status = %response.status().as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        "API request"
    );

    response
}
