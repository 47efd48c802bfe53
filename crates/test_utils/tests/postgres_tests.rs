//! Repository adapters against a real PostgreSQL container
//!
//! Ignored by default; run with `cargo test -p test_utils -- --ignored`
//! on a machine with Docker.

use rust_decimal_macros::dec;

use core_kernel::{HealthCheckable, Pagination, PortError};
use domain_billing::{NewPayment, Payment, PaymentRepository, PaymentType};
use domain_claims::{Claim, ClaimRepository, ClaimStatus};
use domain_client::{Client, ClientRepository};
use domain_policy::{calculate_premium, Policy, PolicyRepository, PolicyStatus};
use domain_user::{User, UserRepository};
use infra_db::{
    PgClaimRepository, PgClientRepository, PgHealthCheck, PgPaymentRepository, PgPolicyRepository,
    PgUserRepository,
};
use test_utils::{db_test, ClientFixtures, NewClaimBuilder, NewPolicyBuilder, TemporalFixtures};

fn new_client() -> Client {
    Client::register(ClientFixtures::random(), TemporalFixtures::today())
}

db_test!(test_health_check_reports_healthy, |pool| {
    let result = PgHealthCheck::new(pool).health_check().await;
    assert!(result.is_healthy());
});

db_test!(test_client_round_trip_and_search, |pool| {
    let repo = PgClientRepository::new(pool);
    let mut new = ClientFixtures::anna();
    new.email = "anna@example.com".to_string();
    let client = repo.create(Client::register(new, TemporalFixtures::today())).await.unwrap();

    assert_eq!(repo.get_by_id(client.id).await.unwrap(), Some(client.clone()));
    assert_eq!(repo.get_by_email("anna@example.com").await.unwrap().map(|c| c.id), Some(client.id));

    let found = repo.search_by_name("KOWAL", Pagination::default()).await.unwrap();
    assert_eq!(found.len(), 1);
    assert!(repo.search_by_name("%", Pagination::default()).await.unwrap().is_empty());
});

db_test!(test_duplicate_email_conflicts, |pool| {
    let repo = PgClientRepository::new(pool);
    let first = repo.create(new_client()).await.unwrap();

    let mut second = new_client();
    second.email = first.email.clone();
    let err = repo.create(second).await.unwrap_err();
    assert!(err.is_conflict(), "{err:?}");
});

db_test!(test_stale_update_rejected, |pool| {
    let repo = PgClientRepository::new(pool);
    let client = repo.create(new_client()).await.unwrap();
    assert_eq!(client.version, 1);

    let mut renamed = client.clone();
    renamed.first_name = "Zofia".to_string();
    let saved = repo.update(renamed).await.unwrap();
    assert_eq!(saved.version, 2);

    let mut stale = client;
    stale.first_name = "Ewa".to_string();
    assert!(matches!(repo.update(stale).await, Err(PortError::Conflict { .. })));
});

db_test!(test_policy_claim_payment_chain, |pool| {
    let clients = PgClientRepository::new(pool.clone());
    let policies = PgPolicyRepository::new(pool.clone());
    let claims = PgClaimRepository::new(pool.clone());
    let payments = PgPaymentRepository::new(pool);
    let today = TemporalFixtures::today();

    let client = clients.create(new_client()).await.unwrap();
    let policy = calculate_premium(Policy::from_new(NewPolicyBuilder::new(client.id).build(), today));
    let policy = policies.create(policy).await.unwrap();
    assert_eq!(policy.premium_amount, dec!(7500.00));
    assert_eq!(policy.status, PolicyStatus::Active);

    let active = policies.get_active_policies(Pagination::default()).await.unwrap();
    assert_eq!(active.len(), 1);

    let mut claim = Claim::file(NewClaimBuilder::new(policy.id).client(client.id).build(), today);
    claim.approve(dec!(2500), today);
    let claim = claims.create(claim).await.unwrap();
    let stored = claims.get_by_claim_number(&claim.claim_number).await.unwrap().unwrap();
    assert_eq!(stored.status, ClaimStatus::Approved);
    assert_eq!(stored.approved_amount, Some(dec!(2500)));

    let payout = Payment::from_new(
        NewPayment {
            payment_number: None,
            client_id: Some(client.id),
            policy_id: Some(policy.id),
            claim_id: Some(claim.id),
            amount: dec!(2500),
            due_date: None,
            status: Default::default(),
            payment_type: PaymentType::ClaimPayout,
            payment_method: Some("bank_transfer".to_string()),
            description: String::new(),
        },
        client.id,
        today,
    );
    let mut payout = payments.create(payout).await.unwrap();
    payout.complete(today);
    let payout = payments.update(payout).await.unwrap();
    assert_eq!(payout.payment_date, Some(today));

    let by_claim = payments.get_by_claim_id(claim.id, Pagination::default()).await.unwrap();
    assert_eq!(by_claim.len(), 1);
});

db_test!(test_delete_referenced_client_conflicts, |pool| {
    let clients = PgClientRepository::new(pool.clone());
    let policies = PgPolicyRepository::new(pool);
    let today = TemporalFixtures::today();

    let client = clients.create(new_client()).await.unwrap();
    policies
        .create(Policy::from_new(NewPolicyBuilder::new(client.id).build(), today))
        .await
        .unwrap();

    let err = clients.delete(client.id).await.unwrap_err();
    assert!(err.is_conflict(), "{err:?}");
});

db_test!(test_user_lookup_and_roles, |pool| {
    let repo = PgUserRepository::new(pool);
    let mut user = User::register(
        "olga".to_string(),
        "olga@example.com".to_string(),
        "Olga Nowak".to_string(),
        "$argon2id$v=19$m=1024,t=1,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
        chrono::Utc::now(),
    );
    user.roles.push("adjuster".to_string());
    let user = repo.create(user).await.unwrap();

    let found = repo.get_by_username("olga").await.unwrap().unwrap();
    assert_eq!(found.roles, vec!["user".to_string(), "adjuster".to_string()]);
    assert_eq!(found.password_hash, user.password_hash);
    assert!(repo.delete(user.id).await.unwrap());
    assert!(repo.get_by_email("olga@example.com").await.unwrap().is_none());
});
