//! HTTP API Layer
//!
//! REST API for the policy administration backend using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: one module per resource, thin wrappers over the domain services
//! - **Middleware**: bearer authentication, admin guard, audit logging
//! - **DTOs**: bodies that are not domain types (login, approval, quotes)
//! - **Error Handling**: domain failures mapped to status codes in one place
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState, Repositories};
//!
//! let repos = Repositories::postgres(pool.clone());
//! let state = AppState::new(config, repos, Arc::new(PgHealthCheck::new(pool)),
//!     PasswordHasher::new(), Arc::new(SystemClock));
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::{Clock, HealthCheckable};
use domain_billing::{PaymentRepository, PaymentService};
use domain_claims::{ClaimRepository, ClaimService};
use domain_client::{ClientRepository, ClientService};
use domain_policy::{PolicyRepository, PolicyService};
use domain_user::{PasswordHasher, UserRepository, UserService};
use infra_db::{
    DatabasePool, PgClaimRepository, PgClientRepository, PgPaymentRepository, PgPolicyRepository,
    PgUserRepository,
};

use crate::config::ApiConfig;
use crate::handlers::{auth as auth_handlers, claims, clients, health, payments, policies, users};
use crate::middleware::{admin_guard, audit_middleware, auth_middleware};

/// Repository adapters the services are wired to
#[derive(Clone)]
pub struct Repositories {
    pub clients: Arc<dyn ClientRepository>,
    pub policies: Arc<dyn PolicyRepository>,
    pub claims: Arc<dyn ClaimRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    /// PostgreSQL adapters sharing one pool
    pub fn postgres(pool: DatabasePool) -> Self {
        Self {
            clients: Arc::new(PgClientRepository::new(pool.clone())),
            policies: Arc::new(PgPolicyRepository::new(pool.clone())),
            claims: Arc::new(PgClaimRepository::new(pool.clone())),
            payments: Arc::new(PgPaymentRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool)),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub clients: Arc<ClientService>,
    pub policies: Arc<PolicyService>,
    pub claims: Arc<ClaimService>,
    pub payments: Arc<PaymentService>,
    pub users: Arc<UserService>,
    pub health: Arc<dyn HealthCheckable>,
}

impl AppState {
    pub fn new(
        config: ApiConfig,
        repos: Repositories,
        health: Arc<dyn HealthCheckable>,
        hasher: PasswordHasher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let Repositories {
            clients,
            policies,
            claims,
            payments,
            users,
        } = repos;

        Self {
            config: Arc::new(config),
            clients: Arc::new(ClientService::new(clients.clone(), clock.clone())),
            policies: Arc::new(PolicyService::new(policies.clone(), clients.clone(), clock.clone())),
            claims: Arc::new(ClaimService::new(
                claims.clone(),
                policies.clone(),
                clients.clone(),
                clock.clone(),
            )),
            payments: Arc::new(PaymentService::new(payments, policies, claims, clients, clock.clone())),
            users: Arc::new(UserService::new(users, hasher, clock)),
            health,
        }
    }
}

/// Creates the main API router
///
/// `/health*` and `/api/v1/auth/*` are public. Everything else under
/// `/api/v1` needs a bearer token; user administration also needs the
/// admin role.
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let auth_routes = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login));

    let admin_user_routes = Router::new()
        .route("/", get(users::list_users))
        .route(
            "/:id",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        .route("/:id/roles", put(users::update_roles))
        .route_layer(axum_middleware::from_fn(admin_guard));

    let user_routes = Router::new()
        .route("/me", get(users::me))
        .route("/me/password", put(users::change_password))
        .merge(admin_user_routes);

    let client_routes = Router::new()
        .route("/", post(clients::create_client).get(clients::list_clients))
        .route("/search", get(clients::search_clients))
        .route("/email/:email", get(clients::get_client_by_email))
        .route(
            "/:id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route("/:id/deactivate", post(clients::deactivate_client));

    let policy_routes = Router::new()
        .route("/", post(policies::create_policy).get(policies::list_policies))
        .route("/active", get(policies::list_active_policies))
        .route("/number/:number", get(policies::get_policy_by_number))
        .route("/calculate-premium", post(policies::calculate_premium))
        .route(
            "/:id",
            get(policies::get_policy)
                .put(policies::update_policy)
                .delete(policies::delete_policy),
        );

    let claims_routes = Router::new()
        .route("/", post(claims::create_claim).get(claims::list_claims))
        .route("/number/:number", get(claims::get_claim_by_number))
        .route(
            "/:id",
            get(claims::get_claim)
                .put(claims::update_claim)
                .delete(claims::delete_claim),
        )
        .route("/:id/status", patch(claims::update_claim_status))
        .route("/:id/approve", post(claims::approve_claim));

    let payment_routes = Router::new()
        .route("/", post(payments::create_payment).get(payments::list_payments))
        .route("/number/:number", get(payments::get_payment_by_number))
        .route("/premium/:policy_id", post(payments::create_premium_payment))
        .route("/payout/:claim_id", post(payments::create_claim_payout))
        .route(
            "/:id",
            get(payments::get_payment)
                .put(payments::update_payment)
                .delete(payments::delete_payment),
        )
        .route("/:id/process", post(payments::process_payment));

    // Protected API routes
    let protected_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/clients", client_routes)
        .nest("/policies", policy_routes)
        .nest("/claims", claims_routes)
        .nest("/payments", payment_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .merge(protected_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
