//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{DomainError, Patch, UserId};

/// Role every new user receives
pub const DEFAULT_ROLE: &str = "user";

/// Role that grants every permission
pub const ADMIN_ROLE: &str = "admin";

/// An API user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique login name
    pub username: String,
    /// Unique across all users
    pub email: String,
    pub full_name: String,
    /// Argon2id PHC string
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub version: i64,
}

/// Self-registration data
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 100))]
    pub password: String,
    #[validate(length(min = 2, max = 100))]
    pub full_name: Option<String>,
}

/// Partial update of a user; the password has its own operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPatch {
    pub username: Patch<String>,
    pub email: Patch<String>,
    pub full_name: Patch<String>,
    pub is_active: Patch<bool>,
    pub roles: Patch<Vec<String>>,
}

impl User {
    /// Active, non-superuser account holding only the default role
    pub fn register(
        username: String,
        email: String,
        full_name: String,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username,
            email,
            full_name,
            password_hash,
            is_active: true,
            is_superuser: false,
            roles: vec![DEFAULT_ROLE.to_string()],
            created_at,
            version: 1,
        }
    }

    /// Superusers and admins hold every role
    pub fn has_role(&self, role: &str) -> bool {
        self.is_superuser || self.roles.iter().any(|r| r == role || r == ADMIN_ROLE)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    pub fn apply_patch(&self, patch: UserPatch) -> Result<User, DomainError> {
        let mut next = self.clone();
        patch.username.apply_required("username", &mut next.username)?;
        patch.email.apply_required("email", &mut next.email)?;
        match patch.full_name {
            Patch::Absent => {}
            Patch::Null => next.full_name.clear(),
            Patch::Set(name) => next.full_name = name,
        }
        patch.is_active.apply_required("is_active", &mut next.is_active)?;
        patch.roles.apply_required("roles", &mut next.roles)?;
        Ok(next)
    }
}
