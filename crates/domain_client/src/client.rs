//! Client entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ClientId, DomainError, Patch};

/// A registered policyholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all clients
    pub email: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub address: String,
    pub passport_number: String,
    pub created_at: NaiveDate,
    pub is_active: bool,
    /// Optimistic concurrency token, bumped by every successful update
    pub version: i64,
}

/// Registration data for a new client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewClient {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 32))]
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub address: String,
    #[validate(length(max = 32))]
    pub passport_number: String,
}

/// Partial update of a client; omitted fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientPatch {
    pub first_name: Patch<String>,
    pub last_name: Patch<String>,
    pub email: Patch<String>,
    pub phone: Patch<String>,
    pub birth_date: Patch<NaiveDate>,
    pub address: Patch<String>,
    pub passport_number: Patch<String>,
    pub is_active: Patch<bool>,
}

impl Client {
    /// Builds an active client created on `today`
    pub fn register(new: NewClient, today: NaiveDate) -> Self {
        Self {
            id: ClientId::new(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            birth_date: new.birth_date,
            address: new.address,
            passport_number: new.passport_number,
            created_at: today,
            is_active: true,
            version: 1,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match on first or last name
    pub fn name_matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.first_name.to_lowercase().contains(&needle)
            || self.last_name.to_lowercase().contains(&needle)
    }

    /// Returns a copy with the patch applied; the version is carried over
    pub fn apply_patch(&self, patch: ClientPatch) -> Result<Client, DomainError> {
        let mut next = self.clone();
        patch.first_name.apply_required("first_name", &mut next.first_name)?;
        patch.last_name.apply_required("last_name", &mut next.last_name)?;
        patch.email.apply_required("email", &mut next.email)?;
        patch.phone.apply_required("phone", &mut next.phone)?;
        patch.birth_date.apply_to(&mut next.birth_date);
        patch.address.apply_required("address", &mut next.address)?;
        patch.passport_number.apply_required("passport_number", &mut next.passport_number)?;
        patch.is_active.apply_required("is_active", &mut next.is_active)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::register(
            NewClient {
                first_name: "Ivan".to_string(),
                last_name: "Sidorov".to_string(),
                email: "ivan@example.com".to_string(),
                phone: String::new(),
                birth_date: None,
                address: String::new(),
                passport_number: String::new(),
            },
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        )
    }

    #[test]
    fn test_name_matches_is_case_insensitive() {
        let c = client();
        assert!(c.name_matches("iva"));
        assert!(c.name_matches("SIDOR"));
        assert!(!c.name_matches("petrov"));
    }

    #[test]
    fn test_apply_patch_touches_only_named_fields() {
        let c = client();
        let patched = c
            .apply_patch(ClientPatch {
                phone: Patch::Set("+1-555".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(patched.phone, "+1-555");
        assert_eq!(patched.email, c.email);
        assert_eq!(patched.version, c.version);
    }

    #[test]
    fn test_apply_patch_rejects_null_email() {
        let err = client()
            .apply_patch(ClientPatch {
                email: Patch::Null,
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
