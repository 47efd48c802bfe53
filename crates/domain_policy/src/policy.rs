//! Policy entity
//!
//! A policy binds a client to a coverage amount for a period. Its premium is
//! derived from coverage and type when the policy is created.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use core_kernel::{text_enum, ClientId, DomainError, Patch, PolicyId};

/// Line of business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyType {
    Life,
    Health,
    Property,
    Vehicle,
    Travel,
}

impl PolicyType {
    pub const ALL: [PolicyType; 5] = [
        PolicyType::Life,
        PolicyType::Health,
        PolicyType::Property,
        PolicyType::Vehicle,
        PolicyType::Travel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::Life => "life",
            PolicyType::Health => "health",
            PolicyType::Property => "property",
            PolicyType::Vehicle => "vehicle",
            PolicyType::Travel => "travel",
        }
    }
}

/// Policy lifecycle status
///
/// Only `Active` policies accept new claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStatus {
    #[default]
    Pending,
    Active,
    Expired,
    Canceled,
}

impl PolicyStatus {
    pub const ALL: [PolicyStatus; 4] = [
        PolicyStatus::Pending,
        PolicyStatus::Active,
        PolicyStatus::Expired,
        PolicyStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::Pending => "pending",
            PolicyStatus::Active => "active",
            PolicyStatus::Expired => "expired",
            PolicyStatus::Canceled => "canceled",
        }
    }
}

/// How often the premium is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 4] = [
        PaymentFrequency::Monthly,
        PaymentFrequency::Quarterly,
        PaymentFrequency::SemiAnnual,
        PaymentFrequency::Annual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::SemiAnnual => "semi_annual",
            PaymentFrequency::Annual => "annual",
        }
    }
}

text_enum!(PolicyType, "policy type", PolicyType::ALL);
text_enum!(PolicyStatus, "policy status", PolicyStatus::ALL);
text_enum!(PaymentFrequency, "payment frequency", PaymentFrequency::ALL);

/// An insurance policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    /// Human-facing number, `POL-XXXXXXXX` unless supplied
    pub policy_number: String,
    pub client_id: ClientId,
    pub policy_type: PolicyType,
    pub status: PolicyStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub coverage_amount: Decimal,
    pub premium_amount: Decimal,
    pub payment_frequency: PaymentFrequency,
    pub created_at: NaiveDate,
    pub description: String,
    pub is_active: bool,
    pub version: i64,
}

/// Data for issuing a policy
///
/// `premium_amount` of `None` or zero means "calculate it".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPolicy {
    pub policy_number: Option<String>,
    pub client_id: ClientId,
    pub policy_type: PolicyType,
    #[serde(default)]
    pub status: PolicyStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub coverage_amount: Decimal,
    pub premium_amount: Option<Decimal>,
    #[serde(default)]
    pub payment_frequency: PaymentFrequency,
    #[serde(default)]
    pub description: String,
}

/// Partial update of a policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyPatch {
    pub policy_number: Patch<String>,
    pub client_id: Patch<ClientId>,
    pub policy_type: Patch<PolicyType>,
    pub status: Patch<PolicyStatus>,
    pub start_date: Patch<NaiveDate>,
    pub end_date: Patch<NaiveDate>,
    pub coverage_amount: Patch<Decimal>,
    pub premium_amount: Patch<Decimal>,
    pub payment_frequency: Patch<PaymentFrequency>,
    pub description: Patch<String>,
    pub is_active: Patch<bool>,
}

impl Policy {
    /// Builds a policy from an application; the premium is taken as given
    pub fn from_new(new: NewPolicy, created_at: NaiveDate) -> Self {
        let id = PolicyId::new();
        Self {
            policy_number: new
                .policy_number
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| id.business_number()),
            id,
            client_id: new.client_id,
            policy_type: new.policy_type,
            status: new.status,
            start_date: new.start_date,
            end_date: new.end_date,
            coverage_amount: new.coverage_amount,
            premium_amount: new.premium_amount.unwrap_or(Decimal::ZERO),
            payment_frequency: new.payment_frequency,
            created_at,
            description: new.description,
            is_active: true,
            version: 1,
        }
    }

    pub fn is_in_force(&self) -> bool {
        self.status == PolicyStatus::Active
    }

    /// Checks `date` against the policy period; an open bound accepts anything
    ///
    /// # Returns
    ///
    /// `Err` with a message naming the violated bound
    pub fn check_within_period(&self, date: NaiveDate) -> Result<(), DomainError> {
        if let Some(start) = self.start_date {
            if date < start {
                return Err(DomainError::invalid_operation(format!(
                    "Incident date {date} is before policy {} start date {start}",
                    self.policy_number
                )));
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return Err(DomainError::invalid_operation(format!(
                    "Incident date {date} is after policy {} end date {end}",
                    self.policy_number
                )));
            }
        }
        Ok(())
    }

    /// Returns a copy with the patch applied; the premium is not recomputed
    pub fn apply_patch(&self, patch: PolicyPatch) -> Result<Policy, DomainError> {
        let mut next = self.clone();
        patch.policy_number.apply_required("policy_number", &mut next.policy_number)?;
        patch.client_id.apply_required("client_id", &mut next.client_id)?;
        patch.policy_type.apply_required("policy_type", &mut next.policy_type)?;
        patch.status.apply_required("status", &mut next.status)?;
        patch.start_date.apply_to(&mut next.start_date);
        patch.end_date.apply_to(&mut next.end_date);
        patch.coverage_amount.apply_required("coverage_amount", &mut next.coverage_amount)?;
        patch.premium_amount.apply_required("premium_amount", &mut next.premium_amount)?;
        patch.payment_frequency.apply_required("payment_frequency", &mut next.payment_frequency)?;
        patch.description.apply_required("description", &mut next.description)?;
        patch.is_active.apply_required("is_active", &mut next.is_active)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn policy(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Policy {
        Policy::from_new(
            NewPolicy {
                policy_number: Some("POL-TEST".to_string()),
                client_id: ClientId::new(),
                policy_type: PolicyType::Health,
                status: PolicyStatus::Active,
                start_date: start,
                end_date: end,
                coverage_amount: dec!(10000),
                premium_amount: None,
                payment_frequency: PaymentFrequency::Monthly,
                description: String::new(),
            },
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_generated_number_when_blank() {
        let mut new = NewPolicy {
            policy_number: Some("  ".to_string()),
            client_id: ClientId::new(),
            policy_type: PolicyType::Life,
            status: PolicyStatus::Pending,
            start_date: None,
            end_date: None,
            coverage_amount: dec!(1),
            premium_amount: None,
            payment_frequency: PaymentFrequency::Annual,
            description: String::new(),
        };
        let p = Policy::from_new(new.clone(), d(2024, 1, 1));
        assert_eq!(p.policy_number, p.id.business_number());

        new.policy_number = Some("POL-CUSTOM".to_string());
        assert_eq!(Policy::from_new(new, d(2024, 1, 1)).policy_number, "POL-CUSTOM");
    }

    #[test]
    fn test_period_bounds_are_inclusive() {
        let p = policy(Some(d(2024, 1, 1)), Some(d(2024, 12, 31)));
        assert!(p.check_within_period(d(2024, 1, 1)).is_ok());
        assert!(p.check_within_period(d(2024, 12, 31)).is_ok());

        let before = p.check_within_period(d(2023, 12, 31)).unwrap_err();
        assert!(before.to_string().contains("before"));
        let after = p.check_within_period(d(2025, 1, 1)).unwrap_err();
        assert!(after.to_string().contains("after"));
    }

    #[test]
    fn test_open_bounds_accept_any_date() {
        let p = policy(None, None);
        assert!(p.check_within_period(d(1900, 1, 1)).is_ok());
        let p = policy(Some(d(2024, 1, 1)), None);
        assert!(p.check_within_period(d(2099, 1, 1)).is_ok());
    }

    #[test]
    fn test_enum_text_round_trip() {
        for t in PolicyType::ALL {
            assert_eq!(t.as_str().parse::<PolicyType>().unwrap(), t);
        }
        assert_eq!("SEMI_ANNUAL".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::SemiAnnual);
        assert!("bogus".parse::<PolicyStatus>().is_err());
        assert_eq!(serde_json::to_string(&PolicyStatus::Active).unwrap(), "\"active\"");
    }

    #[test]
    fn test_patch_keeps_premium() {
        let p = policy(None, None);
        let patched = p
            .apply_patch(PolicyPatch {
                coverage_amount: Patch::Set(dec!(50000)),
                end_date: Patch::Set(d(2030, 1, 1)),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(patched.coverage_amount, dec!(50000));
        assert_eq!(patched.premium_amount, p.premium_amount);
        assert_eq!(patched.end_date, Some(d(2030, 1, 1)));
    }
}
