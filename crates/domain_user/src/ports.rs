//! User Domain Ports

use async_trait::async_trait;

use core_kernel::{DomainError, DomainPort, Pagination, PortError, UserId};

use crate::user::User;

/// Persistence port for users
#[async_trait]
pub trait UserRepository: DomainPort {
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, PortError>;

    /// Stores a new user; a taken username or email is a `Conflict`
    async fn create(&self, user: User) -> Result<User, PortError>;

    /// Replaces a stored user if its version still matches
    async fn update(&self, user: User) -> Result<User, PortError>;

    async fn delete(&self, id: UserId) -> Result<bool, PortError>;

    async fn list(&self, page: Pagination) -> Result<Vec<User>, PortError>;

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, PortError>;

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, PortError>;
}

#[async_trait]
pub trait UserRepositoryExt: UserRepository {
    /// Gets a user or fails with `DomainError::NotFound`
    async fn require(&self, id: UserId) -> Result<User, DomainError> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }
}

impl<T: UserRepository + ?Sized> UserRepositoryExt for T {}

/// Mock implementation of UserRepository for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of UserRepository
    #[derive(Debug, Default, Clone)]
    pub struct MockUserRepository {
        users: Arc<RwLock<HashMap<UserId, User>>>,
    }

    impl MockUserRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn with_users(users: Vec<User>) -> Self {
            let repo = Self::new();
            for user in users {
                repo.users.write().await.insert(user.id, user);
            }
            repo
        }

        pub async fn count(&self) -> usize {
            self.users.read().await.len()
        }

        fn clash(users: &HashMap<UserId, User>, user: &User) -> Option<PortError> {
            users.values().filter(|u| u.id != user.id).find_map(|u| {
                if u.username == user.username {
                    Some(PortError::conflict(format!("username {} is taken", user.username)))
                } else if u.email == user.email {
                    Some(PortError::conflict(format!("email {} is already registered", user.email)))
                } else {
                    None
                }
            })
        }
    }

    impl DomainPort for MockUserRepository {}

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn get_by_id(&self, id: UserId) -> Result<Option<User>, PortError> {
            Ok(self.users.read().await.get(&id).cloned())
        }

        async fn create(&self, user: User) -> Result<User, PortError> {
            let mut users = self.users.write().await;
            if users.contains_key(&user.id) {
                return Err(PortError::conflict(format!("User {} already exists", user.id)));
            }
            if let Some(err) = Self::clash(&users, &user) {
                return Err(err);
            }
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn update(&self, mut user: User) -> Result<User, PortError> {
            let mut users = self.users.write().await;
            let stored = users
                .get(&user.id)
                .ok_or_else(|| PortError::not_found("User", user.id))?;
            if stored.version != user.version {
                return Err(PortError::stale_version("User", user.id, user.version));
            }
            if let Some(err) = Self::clash(&users, &user) {
                return Err(err);
            }
            user.version += 1;
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn delete(&self, id: UserId) -> Result<bool, PortError> {
            Ok(self.users.write().await.remove(&id).is_some())
        }

        async fn list(&self, page: Pagination) -> Result<Vec<User>, PortError> {
            let mut all: Vec<_> = self.users.read().await.values().cloned().collect();
            all.sort_by(|a, b| (a.created_at, &a.username).cmp(&(b.created_at, &b.username)));
            Ok(page.apply(all))
        }

        async fn get_by_username(&self, username: &str) -> Result<Option<User>, PortError> {
            Ok(self
                .users
                .read()
                .await
                .values()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn get_by_email(&self, email: &str) -> Result<Option<User>, PortError> {
            Ok(self.users.read().await.values().find(|u| u.email == email).cloned())
        }
    }
}
