//! Property tests for premium calculation and claim approval

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::round_half_up_cents;
use domain_claims::{Claim, ClaimStatus};
use domain_policy::{premium_for, type_coefficient, BASE_RATE};
use test_utils::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
}

/// Claim on a policy whose coverage never limits the approval
async fn file_claim(system: &InMemorySystem, claim_amount: Decimal) -> Claim {
    let client = system.client().await.unwrap();
    let policy = system
        .policies
        .create(NewPolicyBuilder::new(client.id).coverage(dec!(1000000000)).build())
        .await
        .unwrap();
    system
        .claims
        .create(NewClaimBuilder::new(policy.id).amount(claim_amount).build())
        .await
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_premium_has_cent_precision(coverage in fine_amount_strategy(), policy_type in policy_type_strategy()) {
        let premium = premium_for(coverage, policy_type);
        prop_assert!(premium.scale() <= 2);
        prop_assert!(premium >= Decimal::ZERO);
        prop_assert_eq!(premium, round_half_up_cents(coverage * BASE_RATE * type_coefficient(policy_type)));
    }

    #[test]
    fn test_premium_monotonic_in_coverage(
        a in positive_amount_strategy(),
        b in positive_amount_strategy(),
        policy_type in policy_type_strategy(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(premium_for(low, policy_type) <= premium_for(high, policy_type));
    }

    #[test]
    fn test_approval_within_claim_always_accepted((claim_amount, approved) in claim_and_approval_strategy()) {
        let rt = runtime();
        let outcome = rt.block_on(async {
            let system = InMemorySystem::new();
            let claim = file_claim(&system, claim_amount).await;
            system.claims.approve_claim(claim.id, approved).await
        });

        let claim = outcome.unwrap();
        prop_assert_eq!(claim.status, ClaimStatus::Approved);
        prop_assert_eq!(claim.approved_amount, Some(approved));
    }

    #[test]
    fn test_approval_above_claim_always_rejected(claim_amount in positive_amount_strategy(), excess in positive_amount_strategy()) {
        let rt = runtime();
        let outcome = rt.block_on(async {
            let system = InMemorySystem::new();
            let claim = file_claim(&system, claim_amount).await;
            system.claims.approve_claim(claim.id, claim_amount + excess).await
        });
        prop_assert!(outcome.is_err());
    }
}
