//! HTTP tests against in-memory repositories

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::Utc;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use core_kernel::{AdapterHealth, HealthCheckResult, HealthCheckable, SystemClock};
use domain_billing::{MockPaymentRepository, Payment, PaymentStatus, PaymentType};
use domain_claims::{Claim, ClaimStatus, MockClaimRepository};
use domain_client::{Client, MockClientRepository};
use domain_policy::{MockPolicyRepository, Policy};
use domain_user::{MockUserRepository, PasswordHasher};
use interface_api::config::ApiConfig;
use interface_api::dto::{PremiumQuoteResponse, TokenResponse};
use interface_api::{create_router, AppState, Repositories};

struct StubHealth(bool);

#[async_trait]
impl HealthCheckable for StubHealth {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult {
            adapter_id: "stub".to_string(),
            status: if self.0 {
                AdapterHealth::Healthy
            } else {
                AdapterHealth::Unhealthy
            },
            latency_ms: 0,
            message: None,
            checked_at: Utc::now(),
        }
    }
}

fn state(healthy: bool) -> AppState {
    let repos = Repositories {
        clients: Arc::new(MockClientRepository::new()),
        policies: Arc::new(MockPolicyRepository::new()),
        claims: Arc::new(MockClaimRepository::new()),
        payments: Arc::new(MockPaymentRepository::new()),
        users: Arc::new(MockUserRepository::new()),
    };
    let config = ApiConfig {
        jwt_secret: "test-secret".to_string(),
        ..ApiConfig::default()
    };
    AppState::new(
        config,
        repos,
        Arc::new(StubHealth(healthy)),
        PasswordHasher::with_params(1024, 1, 1).unwrap(),
        Arc::new(SystemClock),
    )
}

fn server(state: AppState) -> TestServer {
    TestServer::new(create_router(state)).unwrap()
}

async fn register_and_login(server: &TestServer, username: &str) -> String {
    server
        .post("/api/v1/auth/register")
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "correct-horse",
        }))
        .await
        .assert_status(StatusCode::CREATED);

    login(server, username, "correct-horse").await
}

async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({ "username": username, "password": password }))
        .await;
    response.assert_status_ok();
    response.json::<TokenResponse>().access_token
}

/// Server plus a token for an admin superuser
async fn admin_server() -> (TestServer, String) {
    let state = state(true);
    state
        .users
        .ensure_admin("root", "root@example.com", "root-password")
        .await
        .unwrap();
    let server = server(state);
    let token = login(&server, "root", "root-password").await;
    (server, token)
}

async fn create_client(server: &TestServer, token: &str, email: &str) -> Client {
    let response = server
        .post("/api/v1/clients")
        .authorization_bearer(token)
        .json(&json!({
            "first_name": "Anna",
            "last_name": "Kowalska",
            "email": email,
            "phone": "+48 600 100 200",
            "birth_date": "1985-04-12",
            "address": "ul. Dluga 1, Gdansk",
            "passport_number": "AB1234567",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Client>()
}

async fn create_active_policy(server: &TestServer, token: &str, client: &Client) -> Policy {
    let response = server
        .post("/api/v1/policies")
        .authorization_bearer(token)
        .json(&json!({
            "client_id": client.id,
            "policy_type": "life",
            "status": "active",
            "start_date": "2024-01-01",
            "end_date": "2034-01-01",
            "coverage_amount": "100000",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Policy>()
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_liveness_is_public() {
        let server = server(state(true));
        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "healthy");
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_readiness_reports_database() {
        server(state(true)).get("/health/ready").await.assert_status_ok();
        server(state(false))
            .get("/health/ready")
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }
}

mod authentication {
    use super::*;

    #[tokio::test]
    async fn test_protected_route_needs_token() {
        let server = server(state(true));
        let response = server.get("/api/v1/clients").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let server = server(state(true));
        server
            .get("/api/v1/clients")
            .authorization_bearer("not-a-jwt")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let server = server(state(true));
        register_and_login(&server, "maria").await;
        server
            .post("/api/v1/auth/login")
            .json(&json!({ "username": "maria", "password": "wrong-password" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let server = server(state(true));
        register_and_login(&server, "maria").await;
        server
            .post("/api/v1/auth/register")
            .json(&json!({
                "username": "maria",
                "email": "other@example.com",
                "password": "correct-horse",
            }))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_short_password_is_unprocessable() {
        let server = server(state(true));
        server
            .post("/api/v1/auth/register")
            .json(&json!({
                "username": "maria",
                "email": "maria@example.com",
                "password": "short",
            }))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_me_returns_caller_without_hash() {
        let server = server(state(true));
        let token = register_and_login(&server, "maria").await;
        let response = server.get("/api/v1/users/me").authorization_bearer(&token).await;
        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["username"], "maria");
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_change_password_then_login() {
        let server = server(state(true));
        let token = register_and_login(&server, "maria").await;
        server
            .put("/api/v1/users/me/password")
            .authorization_bearer(&token)
            .json(&json!({ "current_password": "correct-horse", "new_password": "battery-staple" }))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        login(&server, "maria", "battery-staple").await;
    }
}

mod administration {
    use super::*;

    #[tokio::test]
    async fn test_user_listing_forbidden_for_plain_user() {
        let server = server(state(true));
        let token = register_and_login(&server, "maria").await;
        let response = server.get("/api/v1/users").authorization_bearer(&token).await;
        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(response.json::<Value>()["error"], "forbidden");
    }

    #[tokio::test]
    async fn test_admin_lists_and_grants_roles() {
        let (server, admin) = admin_server().await;
        let user_token = register_and_login(&server, "maria").await;

        let users = server.get("/api/v1/users").authorization_bearer(&admin).await;
        users.assert_status_ok();
        assert_eq!(users.json::<Vec<Value>>().len(), 2);

        let me = server.get("/api/v1/users/me").authorization_bearer(&user_token).await;
        let id = me.json::<Value>()["id"].as_str().unwrap().to_string();

        let response = server
            .put(&format!("/api/v1/users/{id}/roles"))
            .authorization_bearer(&admin)
            .json(&json!({ "roles": ["user", "adjuster"] }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["roles"], json!(["user", "adjuster"]));
    }
}

mod clients {
    use super::*;

    #[tokio::test]
    async fn test_create_then_fetch_by_email() {
        let (server, token) = admin_server().await;
        let client = create_client(&server, &token, "anna@example.com").await;

        let response = server
            .get("/api/v1/clients/email/anna@example.com")
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Client>().id, client.id);
    }

    #[tokio::test]
    async fn test_search_by_name() {
        let (server, token) = admin_server().await;
        create_client(&server, &token, "anna@example.com").await;

        let response = server
            .get("/api/v1/clients/search")
            .add_query_param("name", "kowal")
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Client>>().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_client_is_not_found() {
        let (server, token) = admin_server().await;
        let response = server
            .get(&format!("/api/v1/clients/{}", uuid_like()))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["error"], "not_found");
    }

    #[tokio::test]
    async fn test_invalid_page_limit() {
        let (server, token) = admin_server().await;
        server
            .get("/api/v1/clients")
            .add_query_param("limit", 5000)
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    fn uuid_like() -> String {
        core_kernel::ClientId::new().as_uuid().to_string()
    }
}

mod policies {
    use super::*;

    #[tokio::test]
    async fn test_premium_calculated_on_create() {
        let (server, token) = admin_server().await;
        let client = create_client(&server, &token, "anna@example.com").await;
        let policy = create_active_policy(&server, &token, &client).await;

        assert_eq!(policy.premium_amount, dec!(7500.00));
        assert!(policy.policy_number.starts_with("POL-"));
    }

    #[tokio::test]
    async fn test_calculate_premium_quote() {
        let (server, token) = admin_server().await;
        let response = server
            .post("/api/v1/policies/calculate-premium")
            .authorization_bearer(&token)
            .json(&json!({ "coverage_amount": "20000", "policy_type": "travel" }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<PremiumQuoteResponse>().premium_amount, dec!(600.00));
    }

    #[tokio::test]
    async fn test_policy_for_missing_client() {
        let (server, token) = admin_server().await;
        server
            .post("/api/v1/policies")
            .authorization_bearer(&token)
            .json(&json!({
                "client_id": core_kernel::ClientId::new(),
                "policy_type": "health",
                "coverage_amount": "1000",
            }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_filter_by_client() {
        let (server, token) = admin_server().await;
        let anna = create_client(&server, &token, "anna@example.com").await;
        let other = create_client(&server, &token, "piotr@example.com").await;
        create_active_policy(&server, &token, &anna).await;
        create_active_policy(&server, &token, &other).await;

        let response = server
            .get("/api/v1/policies")
            .add_query_param("client_id", anna.id.as_uuid())
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();
        let policies = response.json::<Vec<Policy>>();
        assert_eq!(policies.len(), 1);
        assert_eq!(policies[0].client_id, anna.id);
    }
}

mod claims_and_payments {
    use super::*;

    async fn file_claim(server: &TestServer, token: &str, policy: &Policy) -> Claim {
        let response = server
            .post("/api/v1/claims")
            .authorization_bearer(token)
            .json(&json!({
                "policy_id": policy.id,
                "incident_date": "2024-05-01",
                "description": "Water damage",
                "claim_amount": "5000",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Claim>()
    }

    #[tokio::test]
    async fn test_claim_infers_client_from_policy() {
        let (server, token) = admin_server().await;
        let client = create_client(&server, &token, "anna@example.com").await;
        let policy = create_active_policy(&server, &token, &client).await;
        let claim = file_claim(&server, &token, &policy).await;

        assert_eq!(claim.client_id, Some(client.id));
        assert_eq!(claim.status, ClaimStatus::Pending);
        assert!(claim.approved_amount.is_none());
    }

    #[tokio::test]
    async fn test_approval_above_claim_amount_is_bad_request() {
        let (server, token) = admin_server().await;
        let client = create_client(&server, &token, "anna@example.com").await;
        let policy = create_active_policy(&server, &token, &client).await;
        let claim = file_claim(&server, &token, &policy).await;

        server
            .post(&format!("/api/v1/claims/{}/approve", claim.id.as_uuid()))
            .authorization_bearer(&token)
            .json(&json!({ "approved_amount": "5000.01" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_negative_approval_is_unprocessable() {
        let (server, token) = admin_server().await;
        let client = create_client(&server, &token, "anna@example.com").await;
        let policy = create_active_policy(&server, &token, &client).await;
        let claim = file_claim(&server, &token, &policy).await;

        server
            .post(&format!("/api/v1/claims/{}/approve", claim.id.as_uuid()))
            .authorization_bearer(&token)
            .json(&json!({ "approved_amount": "-500" }))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_payout_requires_approval() {
        let (server, token) = admin_server().await;
        let client = create_client(&server, &token, "anna@example.com").await;
        let policy = create_active_policy(&server, &token, &client).await;
        let claim = file_claim(&server, &token, &policy).await;

        server
            .post(&format!("/api/v1/payments/payout/{}", claim.id.as_uuid()))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_claim_to_settled_payout() {
        let (server, token) = admin_server().await;
        let client = create_client(&server, &token, "anna@example.com").await;
        let policy = create_active_policy(&server, &token, &client).await;
        let claim = file_claim(&server, &token, &policy).await;

        let response = server
            .patch(&format!("/api/v1/claims/{}/status", claim.id.as_uuid()))
            .authorization_bearer(&token)
            .json(&json!({ "status": "under_review" }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Claim>().status, ClaimStatus::UnderReview);

        let response = server
            .post(&format!("/api/v1/claims/{}/approve", claim.id.as_uuid()))
            .authorization_bearer(&token)
            .json(&json!({ "approved_amount": "2500" }))
            .await;
        response.assert_status_ok();
        let approved = response.json::<Claim>();
        assert_eq!(approved.status, ClaimStatus::Approved);
        assert_eq!(approved.approved_amount, Some(dec!(2500)));

        let response = server
            .post(&format!("/api/v1/payments/payout/{}", claim.id.as_uuid()))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::CREATED);
        let payout = response.json::<Payment>();
        assert_eq!(payout.amount, dec!(2500.00));
        assert_eq!(payout.payment_type, PaymentType::ClaimPayout);
        assert_eq!(payout.status, PaymentStatus::Pending);
        assert_eq!(payout.client_id, client.id);
        assert_eq!(payout.policy_id, Some(policy.id));

        let response = server
            .post(&format!("/api/v1/payments/{}/process", payout.id.as_uuid()))
            .authorization_bearer(&token)
            .json(&json!({ "payment_date": "2024-06-01" }))
            .await;
        response.assert_status_ok();
        let settled = response.json::<Payment>();
        assert_eq!(settled.status, PaymentStatus::Completed);
        assert_eq!(settled.payment_date.map(|d| d.to_string()), Some("2024-06-01".to_string()));

        let response = server
            .get("/api/v1/payments")
            .add_query_param("claim_id", claim.id.as_uuid())
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Payment>>().len(), 1);
    }

    #[tokio::test]
    async fn test_premium_payment_for_policy() {
        let (server, token) = admin_server().await;
        let client = create_client(&server, &token, "anna@example.com").await;
        let policy = create_active_policy(&server, &token, &client).await;

        let response = server
            .post(&format!("/api/v1/payments/premium/{}", policy.id.as_uuid()))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::CREATED);
        let payment = response.json::<Payment>();
        assert_eq!(payment.amount, dec!(7500.00));
        assert_eq!(payment.payment_type, PaymentType::Premium);
        assert!(payment.due_date.is_some());
    }

    #[tokio::test]
    async fn test_payment_without_client_is_unprocessable() {
        let (server, token) = admin_server().await;
        server
            .post("/api/v1/payments")
            .authorization_bearer(&token)
            .json(&json!({ "amount": "10", "payment_type": "refund" }))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}
