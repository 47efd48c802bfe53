//! User account service

use std::sync::Arc;

use tracing::{debug, info, warn};
use validator::Validate;

use core_kernel::{Clock, DomainError, DomainResult, Pagination, PortError, UserId};

use crate::password::{PasswordError, PasswordHasher};
use crate::ports::{UserRepository, UserRepositoryExt};
use crate::user::{NewUser, User, UserPatch, ADMIN_ROLE, DEFAULT_ROLE};

const MIN_PASSWORD_LEN: usize = 8;

fn hashing_failed(err: PasswordError) -> DomainError {
    PortError::internal(err.to_string()).into()
}

/// Registration, authentication and administration of users
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    clock: Arc<dyn Clock>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher, clock: Arc<dyn Clock>) -> Self {
        Self { users, hasher, clock }
    }

    async fn ensure_username_free(&self, username: &str) -> DomainResult<()> {
        if self.users.get_by_username(username).await?.is_some() {
            warn!(username, "Username already taken");
            return Err(DomainError::business_rule(format!(
                "User with username {username} already exists"
            )));
        }
        Ok(())
    }

    async fn ensure_email_free(&self, email: &str) -> DomainResult<()> {
        if self.users.get_by_email(email).await?.is_some() {
            warn!(email, "User email already registered");
            return Err(DomainError::business_rule(format!(
                "User with email {email} already exists"
            )));
        }
        Ok(())
    }

    /// Registers an active user with the default role
    ///
    /// # Errors
    ///
    /// * `Validation` - username, email, password or name malformed
    /// * `BusinessRuleViolation` - username or email already taken
    pub async fn register(&self, new: NewUser) -> DomainResult<User> {
        new.validate()
            .map_err(|e| DomainError::validation(e.to_string()))?;
        self.ensure_username_free(&new.username).await?;
        self.ensure_email_free(&new.email).await?;

        let hash = self.hasher.hash(&new.password).map_err(hashing_failed)?;
        let user = User::register(
            new.username,
            new.email,
            new.full_name.unwrap_or_default(),
            hash,
            self.clock.now(),
        );
        let user = self.users.create(user).await?;
        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Creates the admin superuser unless the username already exists
    ///
    /// Returns the existing user untouched when present.
    pub async fn ensure_admin(&self, username: &str, email: &str, password: &str) -> DomainResult<User> {
        if let Some(existing) = self.users.get_by_username(username).await? {
            debug!(username, "Admin user already present");
            return Ok(existing);
        }

        let hash = self.hasher.hash(password).map_err(hashing_failed)?;
        let mut user = User::register(
            username.to_string(),
            email.to_string(),
            "Administrator".to_string(),
            hash,
            self.clock.now(),
        );
        user.is_superuser = true;
        user.roles = vec![ADMIN_ROLE.to_string(), DEFAULT_ROLE.to_string()];

        let user = self.users.create(user).await?;
        info!(user_id = %user.id, username, "Admin user created");
        Ok(user)
    }

    /// Returns the user when the credentials match an active account
    ///
    /// Unknown usernames, inactive accounts and wrong passwords all yield
    /// `None`.
    pub async fn authenticate(&self, username: &str, password: &str) -> DomainResult<Option<User>> {
        let Some(user) = self.users.get_by_username(username).await? else {
            debug!(username, "Login for unknown user");
            return Ok(None);
        };
        if !user.is_active {
            warn!(user_id = %user.id, "Login for inactive user");
            return Ok(None);
        }
        match self.hasher.verify(password, &user.password_hash) {
            Ok(true) => Ok(Some(user)),
            Ok(false) => {
                warn!(user_id = %user.id, "Login with wrong password");
                Ok(None)
            }
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "Stored password hash unusable");
                Ok(None)
            }
        }
    }

    pub async fn get_user(&self, id: UserId) -> DomainResult<User> {
        self.users.require(id).await
    }

    pub async fn get_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get_by_username(username).await?)
    }

    pub async fn list(&self, page: Pagination) -> DomainResult<Vec<User>> {
        Ok(self.users.list(page).await?)
    }

    /// Applies a partial update, re-checking uniqueness of changed names
    pub async fn update_user(&self, id: UserId, patch: UserPatch) -> DomainResult<User> {
        let current = self.users.require(id).await?;
        if let Some(username) = patch.username.as_set() {
            if *username != current.username {
                self.ensure_username_free(username).await?;
            }
        }
        if let Some(email) = patch.email.as_set() {
            if *email != current.email {
                self.ensure_email_free(email).await?;
            }
        }

        let next = current.apply_patch(patch)?;
        let saved = self.users.update(next).await?;
        info!(user_id = %id, version = saved.version, "User updated");
        Ok(saved)
    }

    /// Replaces the password after verifying the current one
    ///
    /// # Errors
    ///
    /// * `Authentication` - the current password does not match
    /// * `Validation` - the new password is too short
    pub async fn change_password(&self, id: UserId, current_password: &str, new_password: &str) -> DomainResult<()> {
        let mut user = self.users.require(id).await?;
        let matches = self
            .hasher
            .verify(current_password, &user.password_hash)
            .unwrap_or(false);
        if !matches {
            warn!(user_id = %id, "Password change rejected: wrong current password");
            return Err(DomainError::authentication("Current password is incorrect"));
        }
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        user.password_hash = self.hasher.hash(new_password).map_err(hashing_failed)?;
        self.users.update(user).await?;
        info!(user_id = %id, "Password changed");
        Ok(())
    }

    pub async fn update_roles(&self, id: UserId, roles: Vec<String>) -> DomainResult<User> {
        let mut user = self.users.require(id).await?;
        user.roles = roles;
        let user = self.users.update(user).await?;
        info!(user_id = %id, roles = ?user.roles, "User roles updated");
        Ok(user)
    }

    pub async fn delete(&self, id: UserId) -> DomainResult<()> {
        if !self.users.delete(id).await? {
            return Err(DomainError::not_found("User", id));
        }
        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
