//! End-to-end flows across the client, policy, claims and billing services

use rust_decimal_macros::dec;

use core_kernel::{ClaimId, Pagination, PolicyId};
use domain_billing::{PaymentStatus, PaymentType};
use domain_claims::ClaimStatus;
use domain_policy::{PolicyStatus, PolicyType};
use test_utils::*;

mod issuing {
    use super::*;

    #[tokio::test]
    async fn test_every_type_gets_calculated_premium() {
        let system = InMemorySystem::new();
        let client = system.client().await.unwrap();

        for policy_type in PolicyType::ALL {
            let policy = system
                .policies
                .create(NewPolicyBuilder::new(client.id).policy_type(policy_type).build())
                .await
                .unwrap();
            assert_calculated_premium(&policy);
            assert_eq!(policy.created_at, TemporalFixtures::today());
        }

        let page = Pagination::default();
        assert_eq!(system.policies.get_by_client_id(client.id, page).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_explicit_premium_kept() {
        let system = InMemorySystem::new();
        let client = system.client().await.unwrap();
        let policy = system
            .policies
            .create(NewPolicyBuilder::new(client.id).premium(dec!(123.45)).build())
            .await
            .unwrap();
        assert_eq!(policy.premium_amount, dec!(123.45));
    }

    #[tokio::test]
    async fn test_policy_for_unknown_client() {
        let system = InMemorySystem::new();
        assert_not_found(
            system
                .policies
                .create(NewPolicyBuilder::new(IdFixtures::client_id()).build())
                .await,
        );
        assert_eq!(system.policy_repo.count().await, 0);
    }
}

mod claims {
    use super::*;

    #[tokio::test]
    async fn test_claim_on_pending_policy_rejected() {
        let system = InMemorySystem::new();
        let client = system.client().await.unwrap();
        let policy = system
            .policies
            .create(NewPolicyBuilder::new(client.id).status(PolicyStatus::Pending).build())
            .await
            .unwrap();

        assert_invalid_operation(system.claims.create(NewClaimBuilder::new(policy.id).build()).await);
        assert_eq!(system.claim_repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_incident_outside_period_rejected() {
        let system = InMemorySystem::new();
        let (_, policy) = system.insured().await.unwrap();

        for date in [TemporalFixtures::before_policy(), TemporalFixtures::after_policy()] {
            let result = system
                .claims
                .create(NewClaimBuilder::new(policy.id).incident_date(Some(date)).build())
                .await;
            assert_invalid_operation(result);
        }
    }

    #[tokio::test]
    async fn test_claim_report_date_defaults_to_today() {
        let system = InMemorySystem::new();
        let (client, _, claim) = system.claimant().await.unwrap();
        assert_eq!(claim.report_date, TemporalFixtures::today());
        assert_eq!(claim.client_id, Some(client.id));
        assert!(claim.claim_number.starts_with("CLM-"));
    }

    #[tokio::test]
    async fn test_detached_claim_is_accepted() {
        let system = InMemorySystem::new();
        let claim = system.claims.create(NewClaimBuilder::detached().build()).await.unwrap();
        assert!(claim.policy_id.is_none());
        assert!(claim.client_id.is_none());
    }

    #[tokio::test]
    async fn test_approval_bounded_by_claim_amount() {
        let system = InMemorySystem::new();
        let (_, _, claim) = system.claimant().await.unwrap();

        assert_business_rule(system.claims.approve_claim(claim.id, dec!(5000.01)).await);
        let approved = system.claims.approve_claim(claim.id, dec!(5000)).await.unwrap();
        assert_eq!(approved.status, ClaimStatus::Approved);
    }

    #[tokio::test]
    async fn test_approval_bounded_by_coverage() {
        let system = InMemorySystem::new();
        let client = system.client().await.unwrap();
        let policy = system
            .policies
            .create(NewPolicyBuilder::new(client.id).coverage(dec!(1000)).build())
            .await
            .unwrap();
        let claim = system
            .claims
            .create(NewClaimBuilder::new(policy.id).amount(dec!(4000)).build())
            .await
            .unwrap();

        assert_business_rule(system.claims.approve_claim(claim.id, dec!(1500)).await);
        let stored = system.claims.get(claim.id).await.unwrap();
        assert!(stored.approved_amount.is_none());
    }
}

mod settlement {
    use super::*;

    #[tokio::test]
    async fn test_claim_to_completed_payout() {
        let system = InMemorySystem::new();
        let (client, policy, claim) = system.claimant().await.unwrap();

        system
            .claims
            .update_status(claim.id, ClaimStatus::UnderReview)
            .await
            .unwrap();
        system
            .claims
            .approve_claim(claim.id, AmountFixtures::approved())
            .await
            .unwrap();

        let payout = system.payments.create_claim_payout(claim.id).await.unwrap();
        assert_eq!(payout.payment_type, PaymentType::ClaimPayout);
        assert_eq!(payout.status, PaymentStatus::Pending);
        assert_eq!(payout.client_id, client.id);
        assert_eq!(payout.policy_id, Some(policy.id));
        assert_amount_eq(payout.amount, AmountFixtures::approved());

        let settled = system.payments.process_payment(payout.id, None).await.unwrap();
        assert_settled(&settled);
        assert_eq!(settled.payment_date, Some(TemporalFixtures::today()));

        system
            .claims
            .update_status(claim.id, ClaimStatus::Paid)
            .await
            .unwrap();
        let claim = system.claims.get(claim.id).await.unwrap();
        assert_eq!(claim.status, ClaimStatus::Paid);
        assert_eq!(claim.approved_amount, Some(AmountFixtures::approved()));
    }

    #[tokio::test]
    async fn test_payout_for_pending_claim_rejected() {
        let system = InMemorySystem::new();
        let (_, _, claim) = system.claimant().await.unwrap();

        assert_invalid_operation(system.payments.create_claim_payout(claim.id).await);
        assert_eq!(system.payment_repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_premium_payment_due_today() {
        let system = InMemorySystem::new();
        let (client, policy) = system.insured().await.unwrap();

        let payment = system.payments.create_premium_payment(policy.id).await.unwrap();
        assert_eq!(payment.amount, AmountFixtures::life_premium());
        assert_eq!(payment.due_date, Some(TemporalFixtures::today()));
        assert_eq!(payment.client_id, client.id);
        assert!(payment.description.contains(&policy.policy_number));
    }

    #[tokio::test]
    async fn test_payment_client_inferred_from_claim() {
        let system = InMemorySystem::new();
        let (client, policy, claim) = system.claimant().await.unwrap();

        let payment = system
            .payments
            .create(
                NewPaymentBuilder::new(dec!(75))
                    .claim(claim.id)
                    .payment_type(PaymentType::Refund)
                    .build(),
            )
            .await
            .unwrap();
        assert_eq!(payment.client_id, client.id);
        assert_eq!(payment.policy_id, Some(policy.id));
    }

    #[tokio::test]
    async fn test_payment_without_any_reference() {
        let system = InMemorySystem::new();
        assert_validation(system.payments.create(NewPaymentBuilder::new(dec!(10)).build()).await);
        assert_eq!(system.payment_repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_references() {
        let system = InMemorySystem::new();
        assert_not_found(system.payments.create_premium_payment(PolicyId::new()).await);
        assert_not_found(system.payments.create_claim_payout(ClaimId::new()).await);
    }
}
