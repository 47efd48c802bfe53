//! Test Data Builders
//!
//! Builders for the `New*` inputs of each service. Defaults describe an
//! active life policy with a pending claim inside its period; tests set
//! only the fields they care about.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use core_kernel::{ClaimId, ClientId, PolicyId};
use domain_billing::{NewPayment, PaymentStatus, PaymentType};
use domain_claims::{ClaimStatus, NewClaim};
use domain_policy::{NewPolicy, PaymentFrequency, PolicyStatus, PolicyType};

use crate::fixtures::{AmountFixtures, TemporalFixtures};

/// Builder for [`NewPolicy`]
pub struct NewPolicyBuilder {
    inner: NewPolicy,
}

impl NewPolicyBuilder {
    /// Active life policy for 100 000 over calendar year 2024
    pub fn new(client_id: ClientId) -> Self {
        Self {
            inner: NewPolicy {
                policy_number: None,
                client_id,
                policy_type: PolicyType::Life,
                status: PolicyStatus::Active,
                start_date: Some(TemporalFixtures::policy_start()),
                end_date: Some(TemporalFixtures::policy_end()),
                coverage_amount: AmountFixtures::coverage(),
                premium_amount: None,
                payment_frequency: PaymentFrequency::Monthly,
                description: String::new(),
            },
        }
    }

    pub fn policy_number(mut self, number: impl Into<String>) -> Self {
        self.inner.policy_number = Some(number.into());
        self
    }

    pub fn policy_type(mut self, policy_type: PolicyType) -> Self {
        self.inner.policy_type = policy_type;
        self
    }

    pub fn status(mut self, status: PolicyStatus) -> Self {
        self.inner.status = status;
        self
    }

    pub fn period(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.inner.start_date = start;
        self.inner.end_date = end;
        self
    }

    pub fn coverage(mut self, amount: Decimal) -> Self {
        self.inner.coverage_amount = amount;
        self
    }

    /// An explicit premium; zero still gets calculated
    pub fn premium(mut self, amount: Decimal) -> Self {
        self.inner.premium_amount = Some(amount);
        self
    }

    pub fn build(self) -> NewPolicy {
        self.inner
    }
}

/// Builder for [`NewClaim`]
pub struct NewClaimBuilder {
    inner: NewClaim,
}

impl NewClaimBuilder {
    /// Pending claim for 5 000 with an incident inside the default policy period
    pub fn new(policy_id: PolicyId) -> Self {
        Self {
            inner: NewClaim {
                claim_number: None,
                policy_id: Some(policy_id),
                client_id: None,
                incident_date: Some(TemporalFixtures::incident_date()),
                report_date: None,
                description: "Water damage in kitchen".to_string(),
                status: ClaimStatus::Pending,
                claim_amount: AmountFixtures::claim(),
            },
        }
    }

    /// Claim with neither policy nor client
    pub fn detached() -> Self {
        let mut builder = Self::new(PolicyId::new());
        builder.inner.policy_id = None;
        builder
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.inner.client_id = Some(client_id);
        self
    }

    pub fn incident_date(mut self, date: Option<NaiveDate>) -> Self {
        self.inner.incident_date = date;
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.inner.claim_amount = amount;
        self
    }

    pub fn status(mut self, status: ClaimStatus) -> Self {
        self.inner.status = status;
        self
    }

    pub fn build(self) -> NewClaim {
        self.inner
    }
}

/// Builder for [`NewPayment`]
pub struct NewPaymentBuilder {
    inner: NewPayment,
}

impl NewPaymentBuilder {
    /// Pending premium payment with no references set
    pub fn new(amount: Decimal) -> Self {
        Self {
            inner: NewPayment {
                payment_number: None,
                client_id: None,
                policy_id: None,
                claim_id: None,
                amount,
                due_date: None,
                status: PaymentStatus::Pending,
                payment_type: PaymentType::Premium,
                payment_method: None,
                description: String::new(),
            },
        }
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.inner.client_id = Some(client_id);
        self
    }

    pub fn policy(mut self, policy_id: PolicyId) -> Self {
        self.inner.policy_id = Some(policy_id);
        self
    }

    pub fn claim(mut self, claim_id: ClaimId) -> Self {
        self.inner.claim_id = Some(claim_id);
        self
    }

    pub fn payment_type(mut self, payment_type: PaymentType) -> Self {
        self.inner.payment_type = payment_type;
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.inner.payment_method = Some(method.into());
        self
    }

    pub fn build(self) -> NewPayment {
        self.inner
    }
}
